/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of bit streams over memory.

[`MemBitWriter`] appends bits to a growable vector of bytes, and
[`MemBitReader`] reads them back from any slice of bytes, knowing how many
bits of the slice are meaningful. Both have a statically selectable
endianness, which decides the placement of bits inside each byte.

Huffman containers always use [`BE`](crate::traits::BE) streams.

*/

mod mem_bit_reader;
pub use mem_bit_reader::MemBitReader;

mod mem_bit_writer;
pub use mem_bit_writer::MemBitWriter;
