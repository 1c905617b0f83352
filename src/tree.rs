//! Huffman code tree construction.
//!
//! The builder repeatedly merges the two lightest nodes of a min-priority
//! queue. Nodes of equal weight leave the queue in the order they entered it,
//! so the same frequency table always yields the same tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeNode<S> {
    /// A real symbol and its count.
    Leaf {
        /// The symbol.
        symbol: S,
        /// Number of occurrences.
        weight: u64,
    },
    /// Zero-weight placeholder paired with the only symbol of a one-symbol
    /// alphabet. It never receives a codeword and never decodes to output.
    Sentinel,
    /// Merge of two subtrees.
    Internal {
        /// Subtree reached with bit `0`.
        left: Box<CodeNode<S>>,
        /// Subtree reached with bit `1`.
        right: Box<CodeNode<S>>,
        /// Sum of the children's weights.
        weight: u64,
    },
}

impl<S> CodeNode<S> {
    /// Total weight of the subtree.
    pub fn weight(&self) -> u64 {
        match self {
            CodeNode::Leaf { weight, .. } => *weight,
            CodeNode::Sentinel => 0,
            CodeNode::Internal { weight, .. } => *weight,
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            CodeNode::Leaf { .. } | CodeNode::Sentinel => 0,
            CodeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of real (non-sentinel) leaves.
    pub fn leaf_count(&self) -> usize {
        match self {
            CodeNode::Leaf { .. } => 1,
            CodeNode::Sentinel => 0,
            CodeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Queue entry ordered by `(weight, seq)`, lightest and oldest first.
struct Pending<S> {
    weight: u64,
    seq: usize,
    node: CodeNode<S>,
}

impl<S> PartialEq for Pending<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<S> Eq for Pending<S> {}

impl<S> Ord for Pending<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for Pending<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the code tree for `table`.
///
/// # Errors
/// Returns [`Error::EmptyInput`] if the table has no symbols and
/// [`Error::WeightOverflow`] if the counts sum past `u64::MAX`.
pub fn build<S: Clone>(table: &FrequencyTable<S>) -> Result<CodeNode<S>> {
    let mut pq = BinaryHeap::with_capacity(table.len());
    let mut seq = 0;
    for (symbol, weight) in table.iter() {
        pq.push(Pending {
            weight,
            seq,
            node: CodeNode::Leaf {
                symbol: symbol.clone(),
                weight,
            },
        });
        seq += 1;
    }

    let root = loop {
        let left = pq.pop().ok_or(Error::EmptyInput)?;
        let Some(right) = pq.pop() else {
            break left.node;
        };
        let weight = left
            .weight
            .checked_add(right.weight)
            .ok_or(Error::WeightOverflow)?;
        pq.push(Pending {
            weight,
            seq,
            node: CodeNode::Internal {
                left: Box::new(left.node),
                right: Box::new(right.node),
                weight,
            },
        });
        seq += 1;
    };

    // A lone leaf is the root and has no path; pair it with a sentinel.
    let root = match root {
        CodeNode::Leaf { .. } => CodeNode::Internal {
            weight: root.weight(),
            left: Box::new(root),
            right: Box::new(CodeNode::Sentinel),
        },
        tree => tree,
    };

    debug!(
        "built code tree: {} symbols, weight {}, depth {}",
        table.len(),
        root.weight(),
        root.depth()
    );
    Ok(root)
}
