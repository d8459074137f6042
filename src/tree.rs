use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode<S: Symbol> {
    Leaf {
        symbol: S,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<HuffmanNode<S>>,
        right: Box<HuffmanNode<S>>,
    },
}

impl<S: Symbol> HuffmanNode<S> {
    pub fn freq(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { freq, .. } | HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => count += 1,
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }
}

// Queue entry ordered by (freq, seq). Leaves get sequence numbers in
// ascending symbol order, merged nodes get the next free number, so equal
// frequencies always resolve the same way.
struct Queued<S: Symbol> {
    freq: u64,
    seq: usize,
    node: HuffmanNode<S>,
}

impl<S: Symbol> Eq for Queued<S> {}
impl<S: Symbol> PartialEq for Queued<S> {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}
impl<S: Symbol> Ord for Queued<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse for lowest (freq, seq) first.
        (other.freq, other.seq).cmp(&(self.freq, self.seq))
    }
}
impl<S: Symbol> PartialOrd for Queued<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the Huffman tree for `table` by repeated minimum-pair merging.
///
/// The first node extracted becomes the left child and the second the right
/// child. Returns `None` for an empty table and a lone leaf for a table with
/// a single symbol.
pub fn build_tree<S: Symbol>(table: &FrequencyTable<S>) -> Option<HuffmanNode<S>> {
    let mut heap: BinaryHeap<Queued<S>> = table
        .iter()
        .enumerate()
        .map(|(seq, (symbol, freq))| Queued {
            freq,
            seq,
            node: HuffmanNode::Leaf { symbol, freq },
        })
        .collect();
    let mut next_seq = heap.len();

    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let freq = left.freq + right.freq;
        trace!(left = left.freq, right = right.freq, merged = freq, "merge");
        heap.push(Queued {
            freq,
            seq: next_seq,
            node: HuffmanNode::Internal {
                freq,
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
        });
        next_seq += 1;
    }

    heap.pop().map(|root| root.node)
}
