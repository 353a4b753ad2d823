/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::*;
use crate::impls::MemBitReader;
use crate::traits::{BitRead, BE};
use crate::utils::CountBitRead;

/// Decode a [`Container`] into the original bytes.
///
/// See [`decode_with`] to follow the reconstruction of the code.
pub fn decode(container: &Container) -> Result<Vec<u8>> {
    decode_with(container, &mut NoopObserver)
}

/// Decode a [`Container`] into the original bytes, notifying `observer` at
/// the end of each stage.
///
/// The code tree is rebuilt from the symbol table and walked bit by bit; a
/// symbol is emitted at each leaf, and decoding stops after
/// [`original_length`](Container::original_length) symbols. Decoding fails
/// with [`Error::InvalidFormat`] if the symbol table is inconsistent, and
/// with [`Error::CorruptPayload`] if the payload ends early, contains a path
/// leading off the tree, or has meaningful bits left over.
pub fn decode_with(container: &Container, observer: &mut impl Observer) -> Result<Vec<u8>> {
    let freq = container.frequencies()?;
    let total_bits = container
        .payload_bits()
        .ok_or_else(|| Error::corrupt("the padding exceeds the payload"))?;

    if freq.is_empty() {
        if !container.payload().is_empty() || container.padding_bits() != 0 {
            return Err(Error::corrupt("nonempty payload for an empty input"));
        }
        log::debug!("empty container, nothing to decode");
        return Ok(Vec::new());
    }

    let tree = HuffmanTree::new(&freq)?;
    observer.tree_built(&tree);
    let book = CodeBook::new(&tree)?;
    observer.codebook_derived(&freq, &book);

    // every code has at least one bit
    let expected = container.original_length();
    if expected > total_bits {
        return Err(Error::corrupt(format!(
            "{} symbols cannot fit in {} bits",
            expected, total_bits
        )));
    }

    let mut reader = CountBitRead::<BE, _>::new(MemBitReader::<BE, _>::with_bit_len(
        container.payload(),
        total_bits,
    )?);
    let mut output = Vec::with_capacity(expected as usize);
    let root = tree.root();
    let mut node = root;
    while (output.len() as u64) < expected {
        let bit = reader.read_bit().map_err(|_| {
            Error::corrupt(format!(
                "stream exhausted after {} of {} symbols",
                output.len(),
                expected
            ))
        })?;
        node = node.child(bit).ok_or_else(|| {
            Error::corrupt(format!(
                "bit {} at position {} leads off the code tree",
                bit as u8,
                reader.bits_read - 1
            ))
        })?;
        if let Node::Leaf { symbol, .. } = node {
            output.push(*symbol);
            node = root;
        }
    }

    if reader.bits_read != total_bits {
        return Err(Error::corrupt(format!(
            "{} trailing bits after the last symbol",
            total_bits - reader.bits_read
        )));
    }
    observer.payload_unpacked(reader.bits_read, expected);

    log::debug!(
        "decoded {} bytes ({} distinct) from {} bits",
        expected,
        book.len(),
        total_bits
    );

    Ok(output)
}
