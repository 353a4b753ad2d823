/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use dsi_huffman::huffman::{Error, Result};
use dsi_huffman::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn sample() -> Result<Vec<u8>> {
    let mut r = SmallRng::seed_from_u64(0);
    let data = (0..1000)
        .map(|_| r.random_range(b'a'..=b'h'))
        .collect::<Vec<_>>();
    compress(&data)
}

#[test]
fn test_truncated_payload() -> Result<()> {
    let bytes = sample()?;
    assert!(matches!(
        decompress(&bytes[..bytes.len() - 1]),
        Err(Error::CorruptPayload { .. })
    ));
    Ok(())
}

#[test]
fn test_trailing_bytes() -> Result<()> {
    let mut bytes = sample()?;
    bytes.push(0);
    assert!(matches!(
        decompress(&bytes),
        Err(Error::CorruptPayload { .. })
    ));
    Ok(())
}

#[test]
fn test_truncated_header() -> Result<()> {
    let bytes = sample()?;
    let header_len = Container::from_bytes(&bytes)?.header_len();
    for len in [0, 3, 4, 5, 12, 14, 15, header_len - 1] {
        assert!(matches!(
            decompress(&bytes[..len]),
            Err(Error::InvalidFormat { .. })
        ));
    }
    Ok(())
}

#[test]
fn test_bad_magic_and_version() -> Result<()> {
    let mut bytes = sample()?;
    bytes[0] = b'X';
    assert!(matches!(
        decompress(&bytes),
        Err(Error::InvalidFormat { .. })
    ));

    let mut bytes = sample()?;
    bytes[4] = 2;
    assert!(matches!(
        decompress(&bytes),
        Err(Error::InvalidFormat { .. })
    ));
    Ok(())
}

#[test]
fn test_inconsistent_header() -> Result<()> {
    // the original length no longer matches the frequencies
    let mut bytes = sample()?;
    bytes[5] ^= 1;
    assert!(matches!(
        decompress(&bytes),
        Err(Error::InvalidFormat { .. })
    ));

    // padding larger than 7
    let bytes = sample()?;
    let header_len = Container::from_bytes(&bytes)?.header_len();
    let mut bytes = bytes;
    bytes[header_len - 1] = 8;
    assert!(matches!(
        decompress(&bytes),
        Err(Error::InvalidFormat { .. })
    ));

    // symbols out of order
    let container = Container::new(
        2,
        vec![
            SymbolFrequency {
                symbol: b'b',
                count: 1,
            },
            SymbolFrequency {
                symbol: b'a',
                count: 1,
            },
        ],
        6,
        vec![0b0100_0000],
    )?;
    assert!(matches!(
        decode(&container),
        Err(Error::InvalidFormat { .. })
    ));
    Ok(())
}

#[test]
fn test_lone_root_rejects_one() -> Result<()> {
    let container = Container::new(
        2,
        vec![SymbolFrequency {
            symbol: b'q',
            count: 2,
        }],
        6,
        vec![0b1000_0000],
    )?;
    assert!(matches!(
        decode(&container),
        Err(Error::CorruptPayload { .. })
    ));
    Ok(())
}

#[test]
fn test_error_messages() -> Result<()> {
    let err = decompress(b"DSHF").unwrap_err();
    assert!(err.to_string().starts_with("invalid container format"));
    let mut bytes = compress(b"aaabbbbc")?;
    bytes.pop();
    let err = decompress(&bytes).unwrap_err();
    assert!(err.to_string().starts_with("corrupt payload"));
    Ok(())
}
