/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Prefix codes extracted from a Huffman tree.

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use super::{Error, FrequencyTable, HuffmanTree, Node, Result};
use crate::traits::{BitWrite, Endianness};

/// A binary code of at most 64 bits.
///
/// The bits are right-aligned in `bits`; the first bit of the code is the
/// most significant of the `len` lowest bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    /// Return whether this code is a prefix of `other` (a code is a prefix
    /// of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len
            && other
                .bits
                .checked_shr((other.len - self.len) as u32)
                .unwrap_or(0)
                == self.bits
    }

    /// Return the code extended with `bit`, or an error if it would not fit
    /// in 64 bits.
    fn push(self, bit: bool) -> Result<Self> {
        if self.len as u32 == u64::BITS {
            return Err(Error::CodeTooLong {
                len: self.len as usize + 1,
            });
        }
        Ok(self << bit)
    }
}

impl core::fmt::Display for Code {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.len == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.bits, width = self.len as usize)
    }
}

impl core::ops::Shl<bool> for Code {
    type Output = Self;

    #[inline(always)]
    fn shl(mut self, bit: bool) -> Self {
        debug_assert!((self.len as u32) < u64::BITS, "Code too long");
        self.bits <<= 1;
        self.bits |= bit as u64;
        self.len += 1;
        self
    }
}

/// Do a depth first visit of the Huffman tree and extract the codes.
fn extract_codes(node: &Node, code: Code, codes: &mut [Option<Code>; 256]) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => {
            codes[*symbol as usize] = Some(code);
        }
        Node::Internal { left, right, .. } => {
            extract_codes(left, code.push(false)?, codes)?;
            extract_codes(right, code.push(true)?, codes)?;
        }
        Node::Lone { child, .. } => {
            extract_codes(child, code.push(false)?, codes)?;
        }
    }
    Ok(())
}

/// The prefix code of each symbol of a [`HuffmanTree`].
///
/// Codes are root-to-leaf paths, with `0` for left and `1` for right, so no
/// code is a prefix of another.
///
/// # Example
/// ```
/// use dsi_huffman::prelude::*;
///
/// let freq = FrequencyTable::from_bytes(b"aaabbbbc");
/// let book = CodeBook::new(&HuffmanTree::new(&freq).unwrap()).unwrap();
/// assert_eq!(book.get(b'b').unwrap().to_string(), "0");
/// assert_eq!(book.get(b'c').unwrap().to_string(), "10");
/// assert_eq!(book.get(b'a').unwrap().to_string(), "11");
/// assert_eq!(book.encoded_bits(&freq), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct CodeBook {
    codes: [Option<Code>; 256],
}

impl CodeBook {
    /// Derive the codes of the leaves of `tree`.
    pub fn new(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; 256];
        extract_codes(tree.root(), Code::default(), &mut codes)?;
        Ok(Self { codes })
    }

    /// Return the code of `symbol`, if it has one.
    #[inline(always)]
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Iterate over the `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|code| (symbol as u8, code)))
    }

    /// Return the number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the length of the longest code.
    pub fn max_len(&self) -> usize {
        self.iter()
            .map(|(_, code)| code.len as usize)
            .max()
            .unwrap_or(0)
    }

    /// Return the number of bits needed to encode symbols distributed as
    /// in `freq`.
    ///
    /// Symbols without a code are ignored.
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| freq.get(symbol) * code.len as u64)
            .sum()
    }

    /// Write the codes of `data` on `writer` and return the number of bits
    /// written.
    pub fn write_symbols<E: Endianness, W: BitWrite<E>>(
        &self,
        data: &[u8],
        writer: &mut W,
    ) -> Result<u64>
    where
        Error: From<W::Error>,
    {
        let mut written = 0;
        for &symbol in data {
            let code = self.get(symbol).ok_or(Error::UnknownSymbol { symbol })?;
            written += writer.write_code(code)? as u64;
        }
        Ok(written)
    }
}
