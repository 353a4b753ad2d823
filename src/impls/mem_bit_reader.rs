/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;

/// An implementation of [`BitRead`] and [`BitSeek`] for a slice of bytes.
///
/// The reader accesses the slice directly, without buffering, and knows how
/// many bits of the slice are valid: reading beyond that limit fails with
/// [`BitError::UnexpectedEnd`] and leaves the position unchanged. This is how
/// padding bits at the end of a stream are kept out of reach.
///
/// # Example
/// ```
/// use dsi_huffman::prelude::*;
///
/// let data = [0b1011_0000_u8];
/// let mut reader = MemBitReader::<BE, _>::with_bit_len(&data, 4).unwrap();
/// assert_eq!(reader.read_bits(3).unwrap(), 0b101);
/// assert!(reader.read_bit().unwrap());
/// assert!(reader.read_bit().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MemBitReader<E: Endianness, B: AsRef<[u8]>> {
    /// The bytes we read from.
    data: B,
    /// Number of valid bits in `data`.
    bit_len: u64,
    /// The index of the current bit.
    bit_pos: u64,
    _marker: core::marker::PhantomData<E>,
}

impl<E: Endianness, B: AsRef<[u8]>> MemBitReader<E, B> {
    /// Create a new [`MemBitReader`] in which all bits of `data` are valid.
    #[must_use]
    pub fn new(data: B) -> Self {
        let bit_len = data.as_ref().len() as u64 * 8;
        Self {
            data,
            bit_len,
            bit_pos: 0,
            _marker: core::marker::PhantomData,
        }
    }

    /// Create a new [`MemBitReader`] in which only the first `bit_len` bits
    /// of `data` are valid.
    pub fn with_bit_len(data: B, bit_len: u64) -> Result<Self, BitError> {
        let len = data.as_ref().len() as u64 * 8;
        if bit_len > len {
            return Err(BitError::OutOfBounds {
                bit_pos: bit_len,
                len,
            });
        }
        Ok(Self {
            data,
            bit_len,
            bit_pos: 0,
            _marker: core::marker::PhantomData,
        })
    }

    /// Return the number of valid bits.
    #[inline(always)]
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Return the number of valid bits not yet read.
    #[inline(always)]
    pub fn remaining(&self) -> u64 {
        self.bit_len - self.bit_pos
    }

    pub fn into_inner(self) -> B {
        self.data
    }

    #[inline(always)]
    fn bit_at(&self, pos: u64) -> bool {
        let byte = self.data.as_ref()[(pos / 8) as usize];
        let offset = (pos % 8) as u32;
        if E::IS_BIG {
            (byte >> (7 - offset)) & 1 != 0
        } else {
            (byte >> offset) & 1 != 0
        }
    }
}

impl<E: Endianness, B: AsRef<[u8]>> BitRead<E> for MemBitReader<E, B> {
    type Error = BitError;

    #[inline]
    fn read_bit(&mut self) -> Result<bool, Self::Error> {
        if self.bit_pos >= self.bit_len {
            return Err(BitError::UnexpectedEnd {
                bit_pos: self.bit_pos,
            });
        }
        let bit = self.bit_at(self.bit_pos);
        self.bit_pos += 1;
        Ok(bit)
    }

    #[inline]
    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        if n > 64 {
            return Err(BitError::TooManyBits { n });
        }
        if n as u64 > self.remaining() {
            return Err(BitError::UnexpectedEnd {
                bit_pos: self.bit_len,
            });
        }
        let mut value = 0;
        for pos in self.bit_pos..self.bit_pos + n as u64 {
            value = (value << 1) | self.bit_at(pos) as u64;
        }
        self.bit_pos += n as u64;
        Ok(value)
    }

    #[inline]
    fn skip_bits(&mut self, n: usize) -> Result<(), Self::Error> {
        if n as u64 > self.remaining() {
            return Err(BitError::UnexpectedEnd {
                bit_pos: self.bit_len,
            });
        }
        self.bit_pos += n as u64;
        Ok(())
    }
}

impl<E: Endianness, B: AsRef<[u8]>> BitSeek for MemBitReader<E, B> {
    type Error = BitError;

    fn bit_pos(&mut self) -> Result<u64, Self::Error> {
        Ok(self.bit_pos)
    }

    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<(), Self::Error> {
        if bit_pos > self.bit_len {
            return Err(BitError::OutOfBounds {
                bit_pos,
                len: self.bit_len,
            });
        }
        self.bit_pos = bit_pos;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_read_both_orders() -> Result<(), BitError> {
        let data = [0b1000_0011_u8];
        let mut be = MemBitReader::<BE, _>::new(&data);
        let mut le = MemBitReader::<LE, _>::new(&data);
        assert_eq!(be.read_bits(8)?, 0b1000_0011);
        assert_eq!(le.read_bits(8)?, 0b1100_0001);
        Ok(())
    }

    #[test]
    fn test_reading_past_end_keeps_position() -> Result<(), BitError> {
        let data = [0xFF_u8, 0x00];
        let mut reader = MemBitReader::<BE, _>::with_bit_len(&data, 10)?;
        reader.skip_bits(4)?;
        assert_eq!(
            reader.read_bits(7),
            Err(BitError::UnexpectedEnd { bit_pos: 10 })
        );
        assert_eq!(reader.bit_pos()?, 4);
        assert_eq!(reader.read_bits(6)?, 0b1111_00);
        assert_eq!(
            reader.read_bit(),
            Err(BitError::UnexpectedEnd { bit_pos: 10 })
        );
        Ok(())
    }

    #[test]
    fn test_seek() -> Result<(), BitError> {
        let data = [0b0100_0000_u8];
        let mut reader = MemBitReader::<BE, _>::new(data);
        reader.set_bit_pos(1)?;
        assert!(reader.read_bit()?);
        assert!(reader.set_bit_pos(9).is_err());
        reader.set_bit_pos(8)?;
        assert_eq!(reader.remaining(), 0);
        Ok(())
    }

    #[test]
    fn test_bit_len_beyond_data() {
        let data = [0_u8; 2];
        assert_eq!(
            MemBitReader::<LE, _>::with_bit_len(&data, 17).err(),
            Some(BitError::OutOfBounds {
                bit_pos: 17,
                len: 16
            })
        );
    }
}
