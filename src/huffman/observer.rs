/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{CodeBook, FrequencyTable, HuffmanTree};
use crate::utils::CodeStats;

/// Hooks called by [`encode_with`](super::encode_with) and
/// [`decode_with`](super::decode_with) at the end of each stage.
///
/// All methods do nothing by default.
pub trait Observer {
    /// The code tree has been built (or rebuilt, when decoding).
    fn tree_built(&mut self, _tree: &HuffmanTree) {}

    /// The code book has been derived from the tree.
    fn codebook_derived(&mut self, _freq: &FrequencyTable, _book: &CodeBook) {}

    /// The payload has been packed in `bits` bits followed by `padding`
    /// padding bits.
    fn payload_packed(&mut self, _bits: u64, _padding: u8) {}

    /// `symbols` symbols have been decoded from `bits` bits.
    fn payload_unpacked(&mut self, _bits: u64, _symbols: u64) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn tree_built(&mut self, tree: &HuffmanTree) {
        (**self).tree_built(tree)
    }
    fn codebook_derived(&mut self, freq: &FrequencyTable, book: &CodeBook) {
        (**self).codebook_derived(freq, book)
    }
    fn payload_packed(&mut self, bits: u64, padding: u8) {
        (**self).payload_packed(bits, padding)
    }
    fn payload_unpacked(&mut self, bits: u64, symbols: u64) {
        (**self).payload_unpacked(bits, symbols)
    }
}

/// An [`Observer`] that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// An [`Observer`] reporting through the [`log`] facade.
///
/// The tree structure and the single codes are logged at trace level, the
/// [code statistics](CodeStats) at info level, and the payload sizes at
/// debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn tree_built(&mut self, tree: &HuffmanTree) {
        log::trace!("Huffman tree of depth {}:\n{}", tree.depth(), tree);
    }

    fn codebook_derived(&mut self, freq: &FrequencyTable, book: &CodeBook) {
        if log::log_enabled!(log::Level::Trace) {
            for (symbol, code) in book.iter() {
                log::trace!(
                    "symbol: {:#04x} code: {} length: {} weight: {}",
                    symbol,
                    code,
                    code.len,
                    freq.get(symbol)
                );
            }
        }
        log::info!("{}", CodeStats::new(freq, book));
    }

    fn payload_packed(&mut self, bits: u64, padding: u8) {
        log::debug!("packed {} bits with {} padding bits", bits, padding);
    }

    fn payload_unpacked(&mut self, bits: u64, symbols: u64) {
        log::debug!("unpacked {} symbols from {} bits", symbols, bits);
    }
}
