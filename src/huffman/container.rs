/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The self-describing serialized form of an encoded byte stream.
//!
//! All integers are little-endian:
//!
//! | Field             | Type                         | Notes                                  |
//! |-------------------|------------------------------|----------------------------------------|
//! | magic             | 4 bytes, `DSHF`              |                                        |
//! | version           | `u8`                         | currently 1                            |
//! | original length   | `u64`                        | number of decoded bytes                |
//! | symbol count      | `u16`                        | at most 256                            |
//! | symbol table      | count × (`u8`, `u32`)        | symbol and frequency, ascending symbol |
//! | padding bits      | `u8`                         | at most 7                              |
//! | payload           | bytes                        | big-endian bit stream                  |

use std::io::{Cursor, Read, Write};

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use super::{Error, FrequencyTable, Result};

/// Marker identifying a container.
pub const MAGIC: [u8; 4] = *b"DSHF";

/// Current format revision.
pub const VERSION: u8 = 1;

/// Size in bytes of a symbol table entry.
const ENTRY_LEN: usize = 5;

/// Size in bytes of the header of a container without symbols.
const FIXED_HEADER_LEN: usize = MAGIC.len() + 1 + 8 + 2 + 1;

/// A symbol and its number of occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct SymbolFrequency {
    pub symbol: u8,
    pub count: u32,
}

/// An encoded byte stream together with the frequencies needed to rebuild
/// its code.
///
/// [`Container::new`] checks only the structural constraints of the format
/// (at most 256 symbols, at most 7 padding bits); consistency between the
/// symbol table, the original length and the payload is checked when
/// decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawContainer")
)]
pub struct Container {
    original_length: u64,
    symbols: Vec<SymbolFrequency>,
    padding_bits: u8,
    payload: Vec<u8>,
}

/// The fields of a [`Container`] before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawContainer {
    original_length: u64,
    symbols: Vec<SymbolFrequency>,
    padding_bits: u8,
    payload: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawContainer> for Container {
    type Error = Error;

    fn try_from(raw: RawContainer) -> Result<Self> {
        Self::new(
            raw.original_length,
            raw.symbols,
            raw.padding_bits,
            raw.payload,
        )
    }
}

impl Container {
    pub fn new(
        original_length: u64,
        symbols: Vec<SymbolFrequency>,
        padding_bits: u8,
        payload: Vec<u8>,
    ) -> Result<Self> {
        if symbols.len() > 256 {
            return Err(Error::invalid(format!(
                "{} symbols in the symbol table, at most 256 allowed",
                symbols.len()
            )));
        }
        if padding_bits > 7 {
            return Err(Error::invalid(format!(
                "{} padding bits, at most 7 allowed",
                padding_bits
            )));
        }
        Ok(Self {
            original_length,
            symbols,
            padding_bits,
            payload,
        })
    }

    /// The container of the empty byte sequence.
    pub fn empty() -> Self {
        Self {
            original_length: 0,
            symbols: Vec::new(),
            padding_bits: 0,
            payload: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn original_length(&self) -> u64 {
        self.original_length
    }

    #[inline(always)]
    pub fn symbols(&self) -> &[SymbolFrequency] {
        &self.symbols
    }

    #[inline(always)]
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    #[inline(always)]
    pub fn padding_bits(&self) -> u8 {
        self.padding_bits
    }

    #[inline(always)]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Return the number of meaningful bits of the payload, or `None` if
    /// the padding exceeds the payload.
    pub fn payload_bits(&self) -> Option<u64> {
        (self.payload.len() as u64 * 8).checked_sub(self.padding_bits as u64)
    }

    /// Return the size in bytes of the serialized header.
    pub fn header_len(&self) -> usize {
        FIXED_HEADER_LEN + ENTRY_LEN * self.symbols.len()
    }

    /// Return the size in bytes of the serialized container.
    pub fn serialized_len(&self) -> usize {
        self.header_len() + self.payload.len()
    }

    /// Check the symbol table against the original length and return the
    /// corresponding frequency table.
    ///
    /// Symbols must be strictly increasing and have nonzero counts summing
    /// to the original length; in particular, a container has no symbols
    /// exactly when its original length is zero.
    pub fn frequencies(&self) -> Result<FrequencyTable> {
        let mut previous: Option<u8> = None;
        let mut total = 0_u64;
        for entry in &self.symbols {
            if previous.is_some_and(|previous| previous >= entry.symbol) {
                return Err(Error::invalid(format!(
                    "symbol {:#04x} is out of order in the symbol table",
                    entry.symbol
                )));
            }
            if entry.count == 0 {
                return Err(Error::invalid(format!(
                    "symbol {:#04x} has zero frequency",
                    entry.symbol
                )));
            }
            previous = Some(entry.symbol);
            total += entry.count as u64;
        }
        if total != self.original_length {
            return Err(Error::invalid(format!(
                "symbol frequencies sum to {}, but the original length is {}",
                total, self.original_length
            )));
        }
        Ok(self
            .symbols
            .iter()
            .map(|entry| (entry.symbol, entry.count as u64))
            .collect())
    }

    /// Serialize the container on `writer` and return the number of bytes
    /// written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<usize> {
        writer.write_all(&MAGIC)?;
        writer.write_all(&[VERSION])?;
        writer.write_all(&self.original_length.to_le_bytes())?;
        // Container::new guarantees at most 256 symbols
        writer.write_all(&(self.symbols.len() as u16).to_le_bytes())?;
        for entry in &self.symbols {
            writer.write_all(&[entry.symbol])?;
            writer.write_all(&entry.count.to_le_bytes())?;
        }
        writer.write_all(&[self.padding_bits])?;
        writer.write_all(&self.payload)?;
        Ok(self.serialized_len())
    }

    /// Serialize the container.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.serialized_len());
        // writing to a vector never fails
        let _ = self.write_to(&mut bytes);
        bytes
    }

    /// Parse a serialized container.
    ///
    /// Everything following the padding byte is the payload.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let magic = read_array::<4>(&mut cursor, "magic")?;
        if magic != MAGIC {
            return Err(Error::invalid(format!("bad magic {:02x?}", magic)));
        }
        let [version] = read_array::<1>(&mut cursor, "version")?;
        if version != VERSION {
            return Err(Error::invalid(format!(
                "unsupported version {} (expected {})",
                version, VERSION
            )));
        }
        let original_length = u64::from_le_bytes(read_array(&mut cursor, "original length")?);
        let symbol_count = u16::from_le_bytes(read_array(&mut cursor, "symbol count")?) as usize;
        if symbol_count > 256 {
            return Err(Error::invalid(format!(
                "{} symbols in the symbol table, at most 256 allowed",
                symbol_count
            )));
        }

        let mut symbols = Vec::with_capacity(symbol_count);
        for _ in 0..symbol_count {
            let [symbol] = read_array::<1>(&mut cursor, "symbol table")?;
            let count = u32::from_le_bytes(read_array(&mut cursor, "symbol table")?);
            symbols.push(SymbolFrequency { symbol, count });
        }
        let [padding_bits] = read_array::<1>(&mut cursor, "padding bits")?;

        let payload = data[cursor.position() as usize..].to_vec();
        Self::new(original_length, symbols, padding_bits, payload)
    }
}

fn read_array<const N: usize>(cursor: &mut Cursor<&[u8]>, field: &str) -> Result<[u8; N]> {
    let mut buffer = [0; N];
    cursor.read_exact(&mut buffer).map_err(|_| {
        Error::invalid(format!(
            "truncated header: cannot read {} at offset {}",
            field,
            cursor.position()
        ))
    })?;
    Ok(buffer)
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Container {
        Container::new(
            8,
            vec![
                SymbolFrequency {
                    symbol: b'a',
                    count: 3,
                },
                SymbolFrequency {
                    symbol: b'b',
                    count: 4,
                },
                SymbolFrequency {
                    symbol: b'c',
                    count: 1,
                },
            ],
            4,
            vec![0xFC, 0x20],
        )
        .unwrap()
    }

    #[test]
    fn test_layout() {
        let bytes = sample().to_bytes();
        #[rustfmt::skip]
        let expected = [
            b'D', b'S', b'H', b'F',
            1,
            8, 0, 0, 0, 0, 0, 0, 0,
            3, 0,
            b'a', 3, 0, 0, 0,
            b'b', 4, 0, 0, 0,
            b'c', 1, 0, 0, 0,
            4,
            0xFC, 0x20,
        ];
        assert_eq!(bytes, expected);
        assert_eq!(sample().header_len(), 31);
        assert_eq!(sample().serialized_len(), bytes.len());
    }

    #[test]
    fn test_write_to_matches_to_bytes() -> std::io::Result<()> {
        let mut bytes = Vec::new();
        let written = sample().write_to(&mut bytes)?;
        assert_eq!(written, bytes.len());
        assert_eq!(bytes, sample().to_bytes());
        Ok(())
    }

    #[test]
    fn test_parse() -> Result<()> {
        let container = Container::from_bytes(&sample().to_bytes())?;
        assert_eq!(container, sample());
        assert_eq!(container.payload_bits(), Some(12));
        assert_eq!(container.frequencies()?, FrequencyTable::from_bytes(b"aaabbbbc"));
        Ok(())
    }

    #[test]
    fn test_truncated_header() {
        let bytes = sample().to_bytes();
        for len in 0..sample().header_len() {
            assert!(matches!(
                Container::from_bytes(&bytes[..len]),
                Err(Error::InvalidFormat { .. })
            ));
        }
    }

    #[test]
    fn test_structural_limits() {
        assert!(matches!(
            Container::new(0, vec![], 8, vec![]),
            Err(Error::InvalidFormat { .. })
        ));
        let mut bytes = Container::empty().to_bytes();
        bytes[13] = 0x01;
        bytes[14] = 0x01;
        assert!(matches!(
            Container::from_bytes(&bytes),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_limits() -> serde_json::Result<()> {
        let mut value = serde_json::to_value(sample())?;
        assert_eq!(serde_json::from_value::<Container>(value.clone())?, sample());

        value["padding_bits"] = 12.into();
        value["payload"] = serde_json::json!([0xFC, 0x20, 0x00]);
        let err = serde_json::from_value::<Container>(value).unwrap_err();
        assert!(err.to_string().contains("12 padding bits"));

        let entries = (0..=256)
            .map(|i| serde_json::json!({ "symbol": i % 256, "count": 1 }))
            .collect::<Vec<_>>();
        let value = serde_json::json!({
            "original_length": 257,
            "symbols": entries,
            "padding_bits": 0,
            "payload": [],
        });
        assert!(serde_json::from_value::<Container>(value).is_err());
        Ok(())
    }

    #[test]
    fn test_inconsistent_tables() {
        let entry = |symbol, count| SymbolFrequency { symbol, count };
        for (length, symbols) in [
            (5, vec![]),
            (0, vec![entry(1, 1)]),
            (3, vec![entry(2, 1), entry(1, 2)]),
            (2, vec![entry(1, 1), entry(1, 1)]),
            (1, vec![entry(1, 1), entry(2, 0)]),
            (4, vec![entry(1, 1), entry(2, 2)]),
        ] {
            let container = Container::new(length, symbols, 0, vec![]).unwrap();
            assert!(matches!(
                container.frequencies(),
                Err(Error::InvalidFormat { .. })
            ));
        }
    }
}
