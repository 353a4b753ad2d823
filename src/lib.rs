/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]

pub mod huffman;
pub mod impls;
pub mod traits;
pub mod utils;

#[cfg(feature = "fuzz")]
pub mod fuzz;

/// Prelude module to import everything from this crate
///
/// The error type and result alias of [`huffman`] are not included, as they
/// would shadow those of the standard library; refer to them as
/// [`huffman::Error`] and [`huffman::Result`].
pub mod prelude {
    pub use crate::huffman::{
        Code, CodeBook, Container, FrequencyTable, HuffmanTree, LogObserver, Node, NoopObserver,
        Observer, SymbolFrequency, compress, decode, decode_with, decompress, encode, encode_with,
    };
    pub use crate::impls::*;
    pub use crate::traits::*;
    pub use crate::utils::*;
}
