/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2024 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt::{Display, Formatter};

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::huffman::{Code, CodeBook, FrequencyTable};

/// A symbol whose code attains the minimum or maximum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct CodeExtreme {
    pub symbol: u8,
    pub code: Code,
    pub weight: u64,
}

/// Keeps track of the space needed to store a stream of bytes using a
/// [`CodeBook`] instead of eight bits per byte.
///
/// You can [update the structure](Self::update) with the symbols of the
/// stream and their codes, or build it in one step from a frequency table
/// with [`new`](Self::new). On ties, the extremes keep the first symbol
/// seen, which is the smallest one when built by [`new`](Self::new).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct CodeStats {
    /// The number of distinct symbols observed.
    pub symbols: usize,
    /// The total number of symbols observed.
    pub total: u64,
    /// The space used to store the symbols with eight bits each.
    pub raw_bits: u64,
    /// The space used to store the symbols with their codes.
    pub coded_bits: u64,
    /// The symbol with the shortest code.
    pub min: Option<CodeExtreme>,
    /// The symbol with the longest code.
    pub max: Option<CodeExtreme>,
}

impl CodeStats {
    /// Compute the statistics of the symbols of `freq` coded by `book`.
    ///
    /// Symbols without a code are ignored.
    pub fn new(freq: &FrequencyTable, book: &CodeBook) -> Self {
        let mut stats = Self::default();
        for (symbol, code) in book.iter() {
            stats.update(symbol, code, freq.get(symbol));
        }
        stats
    }

    /// Update the stats with `weight` occurrences of `symbol`, coded by
    /// `code`.
    pub fn update(&mut self, symbol: u8, code: Code, weight: u64) {
        self.symbols += 1;
        self.total += weight;
        self.raw_bits += weight * 8;
        self.coded_bits += weight * code.len as u64;

        let extreme = CodeExtreme {
            symbol,
            code,
            weight,
        };
        if self.min.is_none_or(|min| code.len < min.code.len) {
            self.min = Some(extreme);
        }
        if self.max.is_none_or(|max| code.len > max.code.len) {
            self.max = Some(extreme);
        }
    }

    /// Return the percentage of space saved with respect to eight bits
    /// per symbol.
    pub fn reduction(&self) -> f64 {
        if self.raw_bits == 0 {
            return 0.0;
        }
        (1.0 - self.coded_bits as f64 / self.raw_bits as f64) * 100.0
    }

    /// Return the average code length, weighted by frequency.
    pub fn average_len(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.coded_bits as f64 / self.total as f64
    }
}

impl Display for CodeStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(
            f,
            "{} symbols, {} occurrences, average code length {:.3}",
            self.symbols,
            self.total,
            self.average_len()
        )?;
        for (label, extreme) in [("Minimum", self.min), ("Maximum", self.max)] {
            if let Some(e) = extreme {
                writeln!(
                    f,
                    "{} code length {:02} for symbol {:#04x} with code {} and weight {}",
                    label, e.code.len, e.symbol, e.code, e.weight
                )?;
            }
        }
        writeln!(f, "Raw bits:   {:>16}", self.raw_bits)?;
        writeln!(f, "Coded bits: {:>16}", self.coded_bits)?;
        write!(f, "Reduction:  {:>15.2}%", self.reduction())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman::{HuffmanTree, Result};

    #[test]
    fn test_stats() -> Result<()> {
        let freq = FrequencyTable::from_bytes(b"aaabbbbc");
        let book = CodeBook::new(&HuffmanTree::new(&freq)?)?;
        let stats = CodeStats::new(&freq, &book);

        assert_eq!(stats.symbols, 3);
        assert_eq!(stats.total, 8);
        assert_eq!(stats.raw_bits, 64);
        assert_eq!(stats.coded_bits, 12);
        assert_eq!(stats.min.map(|e| e.symbol), Some(b'b'));
        // 'a' and 'c' both have two bits: the smaller symbol wins
        assert_eq!(
            stats.max,
            Some(CodeExtreme {
                symbol: b'a',
                code: Code { bits: 0b11, len: 2 },
                weight: 3
            })
        );
        assert!((stats.reduction() - 81.25).abs() < 1E-9);
        assert!((stats.average_len() - 1.5).abs() < 1E-9);
        assert!(stats.to_string().contains("Reduction:"));
        Ok(())
    }

    #[test]
    fn test_empty_stats() {
        let stats = CodeStats::default();
        assert_eq!(stats.reduction(), 0.0);
        assert_eq!(stats.average_len(), 0.0);
        assert!(stats.min.is_none());
    }
}
