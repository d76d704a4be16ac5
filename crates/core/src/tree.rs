//! Huffman tree construction.
//!
//! The tree is rebuilt from the frequency table on both sides of the
//! container, so construction must be fully deterministic: the same table
//! always produces the same shape, regardless of process or platform.
//!
//! # Ordering
//!
//! Nodes leave the priority queue in ascending weight. Among equal weights:
//! - leaves come before internal nodes
//! - leaves come in ascending byte value
//! - internal nodes come in creation order (oldest first)
//!
//! The first node removed in a merge becomes the left child, the second the
//! right child.
//!
//! # Storage
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to their children by
//! index. Leaves occupy the first slots in ascending byte order; every merge
//! appends one internal node, so the root is always the last slot.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Index of a node inside a [`HuffmanTree`].
pub type NodeId = usize;

/// A tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// One byte value and its frequency
    Leaf { symbol: u8, weight: u64 },
    /// Routing node; weight is the sum of both children
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Binary prefix tree whose leaves are byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// A table with one entry yields a tree whose root is that leaf.
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if the table has no entries.
    pub fn build(freqs: &FrequencyTable) -> Result<Self> {
        if freqs.is_empty() {
            return Err(HuffmanError::EmptyFrequencyTable.into());
        }

        let mut nodes = Vec::with_capacity(2 * freqs.len() - 1);
        nodes.extend(freqs.iter().map(|(symbol, count)| Node::Leaf {
            symbol,
            weight: count as u64,
        }));

        // Keyed on (weight, id): leaf ids precede every internal id and are
        // assigned in ascending byte order, internal ids in creation order.
        let mut queue: BinaryHeap<Reverse<(u64, NodeId)>> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Reverse((node.weight(), id)))
            .collect();

        while queue.len() > 1 {
            let (Some(Reverse((w1, left))), Some(Reverse((w2, right)))) =
                (queue.pop(), queue.pop())
            else {
                break;
            };
            let id = nodes.len();
            nodes.push(Node::Internal {
                weight: w1 + w2,
                left,
                right,
            });
            queue.push(Reverse((w1 + w2, id)));
        }

        let root = nodes.len() - 1;
        log::trace!(
            "built huffman tree: {} leaves, {} nodes",
            freqs.len(),
            nodes.len()
        );
        Ok(Self { nodes, root })
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    ///
    /// Ids come from this tree (`root()` or a child link), so they are
    /// always in range.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// True if the whole tree is a single leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.nodes[self.root].is_leaf()
    }

    /// Total weight (sum of all frequencies).
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.nodes.len().div_ceil(2)
    }

    /// Follow one bit from `from`: `false` goes left, `true` goes right.
    ///
    /// Returns `None` if `from` is a leaf.
    pub fn step(&self, from: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[from] {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }
}
