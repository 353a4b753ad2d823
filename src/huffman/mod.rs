/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Static Huffman coding of byte streams.

The pipeline is the classical one:

1. count the occurrences of each byte in a [`FrequencyTable`];
2. build a [`HuffmanTree`] merging the two lightest nodes until one is left;
3. derive a [`CodeBook`] of prefix codes from the root-to-leaf paths;
4. pack the code of each byte in a big-endian bit stream.

The result is a [`Container`] that stores, besides the packed bits, the
frequencies of the symbols, so that the decoder can rebuild the very same
tree. Construction is deterministic: ties between nodes of equal weight are
broken by symbol value and creation order (see [`tree`]).

[`encode`] and [`decode`] work on containers, whereas [`compress`] and
[`decompress`] work on their serialized form. The variants
[`encode_with`] and [`decode_with`] accept an [`Observer`] that is notified
at the end of each stage; [`LogObserver`] reports through the [`log`] facade.

```
use dsi_huffman::huffman::{compress, decompress, Error};

let compressed = compress(b"aaabbbbc")?;
assert_eq!(&compressed[compressed.len() - 2..], &[0xFC, 0x20]);
assert_eq!(decompress(&compressed)?, b"aaabbbbc");
# Ok::<(), Error>(())
```

*/

mod error;
pub use error::{Error, Result};

mod freq;
pub use freq::FrequencyTable;

pub mod tree;
pub use tree::{HuffmanTree, Node};

mod codebook;
pub use codebook::{Code, CodeBook};

pub mod container;
pub use container::{Container, SymbolFrequency};

mod observer;
pub use observer::{LogObserver, NoopObserver, Observer};

mod encoder;
pub use encoder::{encode, encode_with};

mod decoder;
pub use decoder::{decode, decode_with};

/// Encode `data` and serialize the resulting [`Container`].
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(encode(data)?.to_bytes())
}

/// Parse a serialized [`Container`] and decode it.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decode(&Container::from_bytes(data)?)
}
