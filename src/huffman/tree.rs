/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Construction of Huffman trees.
//!
//! The tree is built by repeatedly merging the two lightest nodes of a
//! binary heap. Ties are broken by a rank so that the result depends on the
//! frequencies only:
//!
//! - a leaf has rank equal to its symbol;
//! - an internal node has rank 256 plus the number of merges performed
//!   before it was created.
//!
//! Thus, among nodes of equal weight, leaves come first in symbol order and
//! internal nodes follow in creation order. The first node extracted by a
//! merge becomes the left child (bit `0`), the second one the right child
//! (bit `1`).

use core::cmp::Ordering;
use core::fmt::{Display, Formatter};
use std::collections::BinaryHeap;

use super::{Error, FrequencyTable, Result};

/// Node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Root of a tree with a single symbol: its child is reached by bit `0`,
    /// so that the symbol has a one-bit code, and bit `1` leads nowhere.
    Lone {
        weight: u64,
        child: Box<Node>,
    },
}

impl Node {
    #[inline(always)]
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } => *weight,
            Self::Internal { weight, .. } => *weight,
            Self::Lone { weight, .. } => *weight,
        }
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Return the child reached by `bit`, if any.
    #[inline(always)]
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { left, right, .. } => Some(if bit { right } else { left }),
            Self::Lone { child, .. } => (!bit).then_some(&**child),
        }
    }

    fn fmt_node(&self, f: &mut Formatter<'_>, depth: usize, label: &str) -> core::fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Self::Leaf { symbol, weight } => writeln!(
                f,
                "{}{} leaf {:#04x} {:?} [weight: {}]",
                indent,
                label,
                symbol,
                char::from(*symbol),
                weight
            ),
            Self::Internal {
                weight,
                left,
                right,
            } => {
                writeln!(f, "{}{} internal [weight: {}]", indent, label, weight)?;
                left.fmt_node(f, depth + 1, "0")?;
                right.fmt_node(f, depth + 1, "1")
            }
            Self::Lone { weight, child } => {
                writeln!(f, "{}{} lone [weight: {}]", indent, label, weight)?;
                child.fmt_node(f, depth + 1, "0")
            }
        }
    }
}

/// Node of a tree in construction, with its tie-breaking rank.
#[derive(Debug)]
struct HeapNode {
    rank: u32,
    node: Node,
}

impl PartialEq for HeapNode {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for HeapNode {}
impl PartialOrd for HeapNode {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapNode {
    /// Reversed, so that the max-heap pops the lightest node first.
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

/// A Huffman tree for byte symbols.
///
/// # Example
/// ```
/// use dsi_huffman::prelude::*;
///
/// let freq = FrequencyTable::from_bytes(b"aaabbbbc");
/// let tree = HuffmanTree::new(&freq).unwrap();
/// assert_eq!(tree.weight(), 8);
/// assert_eq!(tree.depth(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree of the symbols with nonzero count in `freq`.
    pub fn new(freq: &FrequencyTable) -> Result<Self> {
        let mut heap = freq
            .iter()
            .map(|(symbol, weight)| HeapNode {
                rank: symbol as u32,
                node: Node::Leaf { symbol, weight },
            })
            .collect::<BinaryHeap<_>>();

        let mut merges = 0;
        // iteratively merge the two nodes with the lowest weight
        let root = loop {
            let Some(left) = heap.pop() else {
                return Err(Error::EmptyAlphabet);
            };
            let Some(right) = heap.pop() else {
                break match left.node {
                    leaf @ Node::Leaf { .. } => Node::Lone {
                        weight: leaf.weight(),
                        child: Box::new(leaf),
                    },
                    node => node,
                };
            };
            heap.push(HeapNode {
                rank: 256 + merges,
                node: Node::Internal {
                    weight: left.node.weight() + right.node.weight(),
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            });
            merges += 1;
        };

        Ok(Self { root })
    }

    #[inline(always)]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Return the total weight of the tree, that is, the number of symbols
    /// it was built for.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Return the length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
                Node::Lone { child, .. } => 1 + depth(child),
            }
        }
        depth(&self.root)
    }

    /// Return the number of leaves.
    pub fn leaves(&self) -> usize {
        fn leaves(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { left, right, .. } => leaves(left) + leaves(right),
                Node::Lone { child, .. } => leaves(child),
            }
        }
        leaves(&self.root)
    }
}

impl Display for HuffmanTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.root.fmt_node(f, 0, "root")
    }
}
