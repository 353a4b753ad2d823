/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::error::Error;

use crate::huffman::Code;
use crate::traits::*;

/// Errors of the in-memory bit streams.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitError {
    /// A read needed bits beyond the valid range of the stream.
    #[error("unexpected end of bit stream at bit position {bit_pos}")]
    UnexpectedEnd { bit_pos: u64 },
    /// More than 64 bits were requested in a single operation.
    #[error("cannot transfer {n} bits at once: the limit is 64")]
    TooManyBits { n: usize },
    /// A position outside of the stream was requested.
    #[error("bit position {bit_pos} is beyond the end of the stream ({len} bits)")]
    OutOfBounds { bit_pos: u64, len: u64 },
}

/// Sequential, streaming bit-by-bit reads.
///
/// Multi-bit reads return the bits in the lowest positions of the result, the
/// first bit read being the most significant one.
pub trait BitRead<E: Endianness> {
    type Error: Error + Send + Sync + 'static;

    /// Read a single bit.
    fn read_bit(&mut self) -> Result<bool, Self::Error>;

    /// Read `n` bits and return them in the lowest bits.
    ///
    /// Implementors must fail if `n` is greater than 64, and must not advance
    /// the stream if the bits are not all available.
    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error>;

    /// Skip `n` bits from the stream.
    fn skip_bits(&mut self, n: usize) -> Result<(), Self::Error>;
}

/// Sequential, streaming bit-by-bit writes.
///
/// Note that the endianness parameter `E` specifies where bits land inside
/// the bytes of the stream, and not the order in which the bits of a value
/// are emitted, which is always from the most significant one.
pub trait BitWrite<E: Endianness> {
    type Error: Error + Send + Sync + 'static;

    /// Write a single bit and return the number of bits written, that is, one.
    fn write_bit(&mut self, bit: bool) -> Result<usize, Self::Error>;

    /// Write the lowest `n` bits of `value` to the stream and return the number
    /// of bits written, that is, `n`.
    ///
    /// The other bits of `value` are ignored. Implementors must fail if `n` is
    /// greater than 64.
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error>;

    /// Write a prefix code and return its length.
    #[inline(always)]
    fn write_code(&mut self, code: Code) -> Result<usize, Self::Error> {
        self.write_bits(code.bits, code.len as usize)
    }

    /// Pad the last partial byte with zeros and return the number of
    /// padding bits (between 0 and 7).
    ///
    /// Writing after a flush resumes at the next byte boundary.
    fn flush(&mut self) -> Result<usize, Self::Error>;
}

/// Seekability for [`BitRead`] and [`BitWrite`] streams.
pub trait BitSeek {
    type Error: Error + Send + Sync + 'static;
    /// Get the current position in bits from the start of the stream.
    fn bit_pos(&mut self) -> Result<u64, Self::Error>;

    /// Set the current position in bits from the start of the stream to `bit_pos`.
    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<(), Self::Error>;
}
