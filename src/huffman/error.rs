/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::BitError;

/// Result type alias for Huffman coding operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors of Huffman coding operations.
///
/// Decoding fails with [`Error::InvalidFormat`] when the container header is
/// malformed or self-inconsistent, and with [`Error::CorruptPayload`] when
/// the packed bits do not decode to exactly the announced number of symbols.
/// Huffman codes cannot resynchronize, so both are fatal for the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Bad magic or version, truncated header, or inconsistent symbol table.
    #[error("invalid container format: {reason}")]
    InvalidFormat { reason: String },

    /// The payload ended early, led off the code tree, or had bits left over.
    #[error("corrupt payload: {reason}")]
    CorruptPayload { reason: String },

    /// A symbol occurs more often than a container can record.
    #[error("symbol {symbol} occurs {count} times, but at most {max} occurrences can be stored", max = u32::MAX)]
    FrequencyOverflow { symbol: u8, count: u64 },

    /// The code tree is too deep for codes to fit in 64 bits.
    #[error("a code of length {len} does not fit in 64 bits")]
    CodeTooLong { len: usize },

    /// A code tree was requested for a table with no symbols.
    #[error("cannot build a code tree from an empty frequency table")]
    EmptyAlphabet,

    /// A symbol with no code was submitted for encoding.
    #[error("symbol {symbol} has no code in the code book")]
    UnknownSymbol { symbol: u8 },

    /// An error of the underlying bit stream.
    #[error(transparent)]
    Bits(#[from] BitError),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptPayload {
            reason: reason.into(),
        }
    }
}
