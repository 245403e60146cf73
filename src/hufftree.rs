use std::cmp::Ordering;

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        symbol: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// `a` becomes the left ("0") child.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn collect_leaves(&self, out: &mut Vec<(u8, u64)>) {
        match self {
            HuffNode::Leaf { symbol, weight } => out.push((*symbol, *weight)),
            HuffNode::Internal { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }
}

/// A node waiting in the merge queue. Ordered by weight, then by the order
/// in which it entered the queue, so equal weights pop first-in first-out.
#[derive(Debug)]
struct Pending {
    seq: usize,
    node: HuffNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .weight()
            .cmp(&other.node.weight())
            .then(self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Greedy minimum-weight merge. Leaves enter the queue in ascending
    /// symbol order; every merged node is queued after all earlier nodes.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let nodes: Vec<Pending> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (symbol, count))| Pending {
                seq,
                node: HuffNode::new(symbol, count),
            })
            .collect();

        let mut next_seq = nodes.len();
        let mut heap = MinHeap::build(nodes);

        while heap.heap_size() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;
            trace!(
                "merge #{} (w={}) + #{} (w={}) -> #{}",
                x.seq,
                x.node.weight(),
                y.seq,
                y.node.weight(),
                next_seq
            );

            heap.insert(Pending {
                seq: next_seq,
                node: HuffNode::merge(x.node, y.node),
            });
            next_seq += 1;
        }

        let root = heap.extract_min()?.node;
        let tree = HuffmanTree { root };
        debug!(
            "Built prefix tree: {} leaves, depth {}, weight {}",
            tree.leaf_count(),
            tree.depth(),
            tree.weight()
        );
        Ok(tree)
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path; 0 for a lone leaf.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Recovers the frequency table the tree was built from. Fails for
    /// hand-built trees with repeated symbols or zero-weight leaves.
    pub fn frequencies(&self) -> Result<FrequencyTable> {
        let mut leaves = Vec::with_capacity(self.leaf_count());
        self.root.collect_leaves(&mut leaves);
        leaves.sort_unstable_by_key(|&(symbol, _)| symbol);

        FrequencyTable::from_pairs(leaves)
    }
}
