/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Marker types selecting the order of bits inside each byte of a stream.
//!
//! The first bit of a [`BigEndian`] stream is the most significant bit of
//! the first byte; the first bit of a [`LittleEndian`] stream is the least
//! significant one. Multi-bit values are always transferred most significant
//! bit first in stream order, so a [`Code`](crate::huffman::Code) reads the
//! same way under both orders: only the placement inside bytes changes.

/// Inner private trait used to make implementing [`Endianness`]
/// impossible for other structs.
mod private {
    /// This is a [SealedTrait](https://predr.ag/blog/definitive-guide-to-sealed-traits-in-rust/).
    pub trait Endianness {
        /// The name of the endianness.
        const _NAME: &'static str;
        /// Whether the first bit of a byte is its most significant one.
        const _IS_BIG: bool;
    }
}

impl<T: private::Endianness> Endianness for T {
    const NAME: &'static str = T::_NAME;
    const IS_BIG: bool = T::_IS_BIG;
}

/// Marker trait for endianness selector types.
///
/// Its only implementations are [`LittleEndian`] and [`BigEndian`].
pub trait Endianness: private::Endianness {
    /// The name of the endianness.
    const NAME: &'static str;
    /// Whether the first bit of a byte is its most significant one.
    const IS_BIG: bool;
}

/// Selector type for streams filling bytes from the least significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LittleEndian;

/// Selector type for streams filling bytes from the most significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigEndian;

/// Alias for [`BigEndian`]
pub type BE = BigEndian;

/// Alias for [`LittleEndian`]
pub type LE = LittleEndian;

impl private::Endianness for LittleEndian {
    const _NAME: &'static str = "little";
    const _IS_BIG: bool = false;
}

impl private::Endianness for BigEndian {
    const _NAME: &'static str = "big";
    const _IS_BIG: bool = true;
}
