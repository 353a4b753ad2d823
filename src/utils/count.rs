/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;

/// Wrapping struct that keep tracks of written bits. Optionally,
/// logs at trace level information about methods called.
#[derive(Debug, Clone)]
pub struct CountBitWrite<E: Endianness, BW: BitWrite<E>, const PRINT: bool = false> {
    bit_write: BW,
    /// The number of bits written so far on the underlying [`BitWrite`].
    pub bits_written: u64,
    _marker: core::marker::PhantomData<E>,
}

impl<E: Endianness, BW: BitWrite<E>, const PRINT: bool> CountBitWrite<E, BW, PRINT> {
    pub fn new(bit_write: BW) -> Self {
        Self {
            bit_write,
            bits_written: 0,
            _marker: core::marker::PhantomData,
        }
    }

    pub fn into_inner(self) -> BW {
        self.bit_write
    }
}

impl<E: Endianness, BW: BitWrite<E>, const PRINT: bool> BitWrite<E>
    for CountBitWrite<E, BW, PRINT>
{
    type Error = BW::Error;

    fn write_bit(&mut self, bit: bool) -> Result<usize, Self::Error> {
        self.bit_write.write_bit(bit).map(|x| {
            self.bits_written += x as u64;
            if PRINT {
                log::trace!("write_bit({}) (total = {})", bit as u8, self.bits_written);
            }
            x
        })
    }

    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error> {
        self.bit_write.write_bits(value, n).map(|x| {
            self.bits_written += x as u64;
            if PRINT {
                log::trace!(
                    "write_bits({:#x}, {}) = {} (total = {})",
                    value,
                    n,
                    x,
                    self.bits_written
                );
            }
            x
        })
    }

    fn flush(&mut self) -> Result<usize, Self::Error> {
        self.bit_write.flush().map(|padding| {
            if PRINT {
                log::trace!("flush() = {} (total = {})", padding, self.bits_written);
            }
            padding
        })
    }
}

/// Wrapping struct that keep tracks of read bits. Optionally,
/// logs at trace level information about methods called.
#[derive(Debug, Clone)]
pub struct CountBitRead<E: Endianness, BR: BitRead<E>, const PRINT: bool = false> {
    bit_read: BR,
    /// The number of bits read (or skipped) so far from the underlying [`BitRead`].
    pub bits_read: u64,
    _marker: core::marker::PhantomData<E>,
}

impl<E: Endianness, BR: BitRead<E>, const PRINT: bool> CountBitRead<E, BR, PRINT> {
    pub fn new(bit_read: BR) -> Self {
        Self {
            bit_read,
            bits_read: 0,
            _marker: core::marker::PhantomData,
        }
    }

    pub fn into_inner(self) -> BR {
        self.bit_read
    }
}

impl<E: Endianness, BR: BitRead<E>, const PRINT: bool> BitRead<E> for CountBitRead<E, BR, PRINT> {
    type Error = BR::Error;

    fn read_bit(&mut self) -> Result<bool, Self::Error> {
        self.bit_read.read_bit().map(|bit| {
            self.bits_read += 1;
            if PRINT {
                log::trace!("read_bit() = {} (total = {})", bit as u8, self.bits_read);
            }
            bit
        })
    }

    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        self.bit_read.read_bits(n).map(|x| {
            self.bits_read += n as u64;
            if PRINT {
                log::trace!("read_bits({}) = {:#x} (total = {})", n, x, self.bits_read);
            }
            x
        })
    }

    fn skip_bits(&mut self, n: usize) -> Result<(), Self::Error> {
        self.bit_read.skip_bits(n).map(|()| {
            self.bits_read += n as u64;
            if PRINT {
                log::trace!("skip_bits({}) (total = {})", n, self.bits_read);
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_count() -> Result<(), BitError> {
        let mut count_bit_write = CountBitWrite::<_, _, true>::new(MemBitWriter::<LE>::new());

        count_bit_write.write_bit(true)?;
        assert_eq!(count_bit_write.bits_written, 1);
        count_bit_write.write_bits(1, 20)?;
        assert_eq!(count_bit_write.bits_written, 21);
        count_bit_write.write_bits(1, 33)?;
        assert_eq!(count_bit_write.bits_written, 54);
        assert_eq!(count_bit_write.flush()?, 2);
        assert_eq!(count_bit_write.bits_written, 54);

        let (buffer, _) = count_bit_write.into_inner().into_inner();
        let mut count_bit_read = CountBitRead::<_, _, true>::new(MemBitReader::<LE, _>::new(buffer));

        assert!(count_bit_read.read_bit()?);
        assert_eq!(count_bit_read.bits_read, 1);
        assert_eq!(count_bit_read.read_bits(20)?, 1);
        assert_eq!(count_bit_read.bits_read, 21);
        count_bit_read.skip_bits(33)?;
        assert_eq!(count_bit_read.bits_read, 54);
        assert!(count_bit_read.read_bits(3).is_err());
        assert_eq!(count_bit_read.bits_read, 54);

        Ok(())
    }
}
