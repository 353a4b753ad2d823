/*
* SPDX-FileCopyrightText: 2023 Tommaso Fontana
*
* SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
*/

use crate::huffman::Error;
use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    data: Vec<u8>,
    flips: Vec<(u16, u8)>,
    truncate: Option<u16>,
}

pub fn harness(case: FuzzCase) {
    let container = encode(&case.data).unwrap();
    let bytes = container.to_bytes();
    assert_eq!(bytes.len(), container.serialized_len());
    assert_eq!(decompress(&bytes).unwrap(), case.data);

    let book_bits = if case.data.is_empty() {
        0
    } else {
        let freq = FrequencyTable::from_bytes(&case.data);
        let book = CodeBook::new(&HuffmanTree::new(&freq).unwrap()).unwrap();
        for (symbol, code) in book.iter() {
            for (other, other_code) in book.iter() {
                assert!(symbol == other || !code.is_prefix_of(&other_code));
            }
        }
        book.encoded_bits(&freq)
    };
    assert_eq!(container.payload_bits(), Some(book_bits));

    // damaged containers must be rejected or decoded, but never panic
    let mut damaged = bytes.clone();
    for &(pos, mask) in &case.flips {
        if !damaged.is_empty() {
            let len = damaged.len();
            damaged[pos as usize % len] ^= mask;
        }
    }
    if let Some(len) = case.truncate {
        damaged.truncate(len as usize);
    }
    match decompress(&damaged) {
        Ok(decoded) => {
            let container = Container::from_bytes(&damaged).unwrap();
            assert_eq!(decoded.len() as u64, container.original_length());
        }
        Err(Error::InvalidFormat { .. } | Error::CorruptPayload { .. }) => {}
        Err(err) => panic!("unexpected error: {}", err),
    }
}
