/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::*;
use crate::impls::MemBitWriter;
use crate::traits::{BE, BitWrite};
use crate::utils::CountBitWrite;

/// Encode `data` into a [`Container`].
///
/// See [`encode_with`] to follow the construction of the code.
pub fn encode(data: &[u8]) -> Result<Container> {
    encode_with(data, &mut NoopObserver)
}

/// Encode `data` into a [`Container`], notifying `observer` at the end of
/// each stage.
///
/// The only possible failure is a byte occurring more than [`u32::MAX`]
/// times, which cannot be recorded in the symbol table.
pub fn encode_with(data: &[u8], observer: &mut impl Observer) -> Result<Container> {
    #[cfg(feature = "rayon")]
    let freq = FrequencyTable::par_from_bytes(data);
    #[cfg(not(feature = "rayon"))]
    let freq = FrequencyTable::from_bytes(data);

    if freq.is_empty() {
        log::debug!("empty input, nothing to encode");
        return Ok(Container::empty());
    }

    let symbols = freq
        .iter()
        .map(|(symbol, count)| {
            u32::try_from(count)
                .map(|count| SymbolFrequency { symbol, count })
                .map_err(|_| Error::FrequencyOverflow { symbol, count })
        })
        .collect::<Result<Vec<_>>>()?;

    let tree = HuffmanTree::new(&freq)?;
    observer.tree_built(&tree);
    let book = CodeBook::new(&tree)?;
    observer.codebook_derived(&freq, &book);

    let mut writer = CountBitWrite::<BE, _>::new(MemBitWriter::<BE>::with_capacity(
        book.encoded_bits(&freq).div_ceil(8) as usize,
    ));
    book.write_symbols(data, &mut writer)?;
    let padding_bits = writer.flush()? as u8;
    let bits = writer.bits_written;
    let (payload, _) = writer.into_inner().into_inner();
    observer.payload_packed(bits, padding_bits);

    log::debug!(
        "encoded {} bytes ({} distinct) in {} bits, {} padding bits",
        data.len(),
        symbols.len(),
        bits,
        padding_bits
    );

    Container::new(data.len() as u64, symbols, padding_bits, payload)
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Default)]
    struct Stages(Vec<&'static str>);

    impl Observer for Stages {
        fn tree_built(&mut self, _tree: &HuffmanTree) {
            self.0.push("tree");
        }
        fn codebook_derived(&mut self, _freq: &FrequencyTable, _book: &CodeBook) {
            self.0.push("codebook");
        }
        fn payload_packed(&mut self, bits: u64, padding: u8) {
            assert_eq!((bits, padding), (12, 4));
            self.0.push("packed");
        }
    }

    #[test]
    fn test_encode_sample() -> Result<()> {
        let mut stages = Stages::default();
        let container = encode_with(b"aaabbbbc", &mut stages)?;
        assert_eq!(stages.0, ["tree", "codebook", "packed"]);
        assert_eq!(container.original_length(), 8);
        assert_eq!(container.payload(), &[0xFC, 0x20]);
        assert_eq!(container.padding_bits(), 4);
        assert_eq!(
            container.symbols(),
            &[
                SymbolFrequency {
                    symbol: b'a',
                    count: 3
                },
                SymbolFrequency {
                    symbol: b'b',
                    count: 4
                },
                SymbolFrequency {
                    symbol: b'c',
                    count: 1
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_packed_bits_match_code_book() -> Result<()> {
        struct Packed(u64, u8);
        impl Observer for Packed {
            fn payload_packed(&mut self, bits: u64, padding: u8) {
                self.0 = bits;
                self.1 = padding;
            }
        }

        let data = b"the quick brown fox jumps over the lazy dog";
        let freq = FrequencyTable::from_bytes(data);
        let book = CodeBook::new(&HuffmanTree::new(&freq)?)?;
        let mut packed = Packed(0, 0);
        let container = encode_with(data, &mut packed)?;
        assert_eq!(packed.0, book.encoded_bits(&freq));
        assert_eq!(container.payload_bits(), Some(packed.0));
        assert_eq!(packed.1, container.padding_bits());
        Ok(())
    }

    #[test]
    fn test_encode_empty() -> Result<()> {
        let mut stages = Stages::default();
        assert_eq!(encode_with(&[], &mut stages)?, Container::empty());
        assert!(stages.0.is_empty());
        Ok(())
    }

    #[test]
    fn test_encode_single_symbol() -> Result<()> {
        let container = encode(&[7; 17])?;
        assert_eq!(container.symbol_count(), 1);
        assert_eq!(container.payload(), &[0, 0, 0]);
        assert_eq!(container.padding_bits(), 7);
        Ok(())
    }
}
