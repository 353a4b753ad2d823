/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;

/// An implementation of [`BitWrite`] appending to a growable vector of bytes.
///
/// Endianness can be selected using the parameter `E`; it decides where
/// bits land inside each byte (see [`Endianness`]).
///
/// Bits are accumulated in a one-byte buffer that is pushed to the vector as
/// soon as it is full. [`BitWrite::flush`] pads a partial buffer with zeros
/// and reports how many padding bits were added.
///
/// # Example
/// ```
/// use dsi_huffman::prelude::*;
///
/// let mut writer = MemBitWriter::<BE>::new();
/// writer.write_bits(0b101, 3).unwrap();
/// writer.write_bit(true).unwrap();
/// assert_eq!(writer.bits_written(), 4);
///
/// let (bytes, padding) = writer.into_inner();
/// assert_eq!(bytes, vec![0b1011_0000]);
/// assert_eq!(padding, 4);
/// ```
#[derive(Debug, Clone)]
pub struct MemBitWriter<E: Endianness> {
    /// Completed bytes.
    data: Vec<u8>,
    /// Bits of the byte being filled.
    buffer: u8,
    /// How many bits of `buffer` are valid.
    bits_in_buffer: usize,
    /// Number of bits written, padding excluded.
    bits_written: u64,
    _marker: core::marker::PhantomData<E>,
}

impl<E: Endianness> MemBitWriter<E> {
    /// Create a new empty [`MemBitWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new empty [`MemBitWriter`] with room for `bytes` bytes.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            buffer: 0,
            bits_in_buffer: 0,
            bits_written: 0,
            _marker: core::marker::PhantomData,
        }
    }

    /// Return the number of bits written so far, padding excluded.
    #[inline(always)]
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Flush the writer and return the bytes written together with the
    /// number of padding bits in the last byte.
    pub fn into_inner(mut self) -> (Vec<u8>, u8) {
        let padding = self.pad();
        (self.data, padding)
    }

    #[inline(always)]
    fn push_bit(&mut self, bit: bool) {
        if E::IS_BIG {
            self.buffer = (self.buffer << 1) | bit as u8;
        } else {
            self.buffer |= (bit as u8) << self.bits_in_buffer;
        }
        self.bits_in_buffer += 1;
        if self.bits_in_buffer == 8 {
            self.data.push(self.buffer);
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
    }

    fn pad(&mut self) -> u8 {
        if self.bits_in_buffer == 0 {
            return 0;
        }
        let padding = 8 - self.bits_in_buffer;
        if E::IS_BIG {
            self.buffer <<= padding;
        }
        self.data.push(self.buffer);
        self.buffer = 0;
        self.bits_in_buffer = 0;
        padding as u8
    }
}

impl<E: Endianness> Default for MemBitWriter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Endianness> BitWrite<E> for MemBitWriter<E> {
    type Error = BitError;

    #[inline]
    fn write_bit(&mut self, bit: bool) -> Result<usize, Self::Error> {
        self.push_bit(bit);
        self.bits_written += 1;
        Ok(1)
    }

    #[inline]
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error> {
        if n > 64 {
            return Err(BitError::TooManyBits { n });
        }
        for shift in (0..n).rev() {
            self.push_bit((value >> shift) & 1 != 0);
        }
        self.bits_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> Result<usize, Self::Error> {
        Ok(self.pad() as usize)
    }
}
