/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Byte frequency tables.

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// Number of occurrences of each of the 256 byte values.
///
/// Only symbols with a nonzero count take part in the construction of a
/// [`HuffmanTree`](super::HuffmanTree); [`iter`](Self::iter) yields exactly
/// those, in ascending symbol order.
///
/// # Example
/// ```
/// use dsi_huffman::prelude::*;
///
/// let freq = FrequencyTable::from_bytes(b"abracadabra");
/// assert_eq!(freq.get(b'a'), 5);
/// assert_eq!(freq.distinct(), 5);
/// assert_eq!(freq.total(), 11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the bytes of `data` in a single pass.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Count the bytes of `data` splitting the work among the threads of the
    /// current [`rayon`] pool.
    ///
    /// The result is identical to [`from_bytes`](Self::from_bytes).
    #[cfg(feature = "rayon")]
    pub fn par_from_bytes(data: &[u8]) -> Self {
        use rayon::prelude::*;
        const CHUNK: usize = 1 << 16;
        data.par_chunks(CHUNK)
            .map(Self::from_bytes)
            .reduce(Self::new, |mut acc, partial| {
                acc.merge(&partial);
                acc
            })
    }

    /// Return the count of `symbol`.
    #[inline(always)]
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Add `count` occurrences of `symbol`.
    #[inline(always)]
    pub fn add(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] += count;
    }

    /// Add the counts of `other` to this table.
    pub fn merge(&mut self, other: &Self) {
        for (count, other) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += other;
        }
    }

    /// Return the number of symbols with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Return the sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Return whether no symbol has a nonzero count.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Iterate over the `(symbol, count)` pairs with a nonzero count, in
    /// ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.add(symbol, count);
        }
        table
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty() {
        let freq = FrequencyTable::from_bytes(&[]);
        assert!(freq.is_empty());
        assert_eq!(freq.distinct(), 0);
        assert_eq!(freq.total(), 0);
        assert_eq!(freq.iter().count(), 0);
    }

    #[test]
    fn test_iter_is_sorted_and_sparse() {
        let freq = FrequencyTable::from_bytes(b"zzyxxx\x00");
        assert_eq!(
            freq.iter().collect::<Vec<_>>(),
            vec![(0, 1), (b'x', 3), (b'y', 1), (b'z', 2)]
        );
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let (head, tail) = data.split_at(17);
        let mut freq = FrequencyTable::from_bytes(head);
        freq.merge(&FrequencyTable::from_bytes(tail));
        assert_eq!(freq, FrequencyTable::from_bytes(data));
    }

    #[test]
    fn test_from_iter() {
        let freq: FrequencyTable = [(b'a', 3), (b'c', 1), (b'a', 2)].into_iter().collect();
        assert_eq!(freq.get(b'a'), 5);
        assert_eq!(freq.get(b'b'), 0);
        assert_eq!(freq.get(b'c'), 1);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_from_bytes() {
        let data = (0..1_000_000_u32)
            .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
            .collect::<Vec<_>>();
        assert_eq!(
            FrequencyTable::par_from_bytes(&data),
            FrequencyTable::from_bytes(&data)
        );
    }
}
