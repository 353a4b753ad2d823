/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Debug helpers and statistics.

[`CountBitRead`] and [`CountBitWrite`] keep track of the number
of bits read or written to a [`BitRead`](crate::traits::BitRead)
and [`BitWrite`](crate::traits::BitWrite), respectively,
optionally logging at trace level the operations performed on the stream.

[`CodeStats`] keeps track of the space needed to store a stream of
bytes using a [`CodeBook`](crate::huffman::CodeBook).

*/

mod count;
pub use count::*;

pub mod stats;
pub use stats::{CodeExtreme, CodeStats};
