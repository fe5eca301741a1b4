
//! Construction of the optimal prefix tree from symbol statistics.

use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;


/// A node of the prefix tree. Branches always own exactly two children,
/// and a branch's frequency is the sum of its children's frequencies.
/// Built once per compression run and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanTree {

    /// Carries one symbol of the alphabet and its occurrence count.
    Leaf {

        /// The byte value this leaf encodes.
        symbol: u8,

        /// How often that byte occurred in the input.
        frequency: u64,
    },

    /// Joins the two least frequent subtrees below it.
    Branch {

        /// Sum of both children's frequencies.
        frequency: u64,

        /// Subtree reached by a `0` bit.
        left: Box<HuffmanTree>,

        /// Subtree reached by a `1` bit.
        right: Box<HuffmanTree>,
    },
}

impl HuffmanTree {

    /// The occurrence count of this subtree.
    pub fn frequency(&self) -> u64 {
        match self {
            HuffmanTree::Leaf { frequency, .. } => *frequency,
            HuffmanTree::Branch { frequency, .. } => *frequency,
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanTree::Leaf { .. } => 1,
            HuffmanTree::Branch { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Build the optimal prefix tree for the given statistics.
    /// Returns `None` for an empty table, as no tree exists over an empty alphabet.
    ///
    /// Repeatedly joins the two least frequent nodes until one root remains.
    /// Equal frequencies are ordered by a fixed rank: leaves rank by their
    /// byte value, joined nodes rank by creation order after all leaves.
    /// The same input therefore always produces the same tree.
    ///
    /// An input with only one distinct byte value gets a synthetic sibling
    /// leaf with frequency zero, so that the real symbol still receives a
    /// code of length one instead of an empty code.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        let mut heap = BinaryHeap::with_capacity(frequencies.distinct_symbol_count() + 1);

        for (symbol, frequency) in frequencies.symbols_with_counts() {
            heap.push(HeapNode {
                frequency,
                rank: symbol as u16,
                tree: HuffmanTree::Leaf { symbol, frequency },
            });
        }

        if heap.is_empty() {
            return None;
        }

        if heap.len() == 1 {
            let lonely_symbol = match heap.peek() {
                Some(HeapNode { tree: HuffmanTree::Leaf { symbol, .. }, .. }) => *symbol,
                _ => unreachable!("single heap entry must be a leaf"),
            };

            // any byte value other than the real one works here
            let sibling = lonely_symbol.wrapping_add(1);
            heap.push(HeapNode {
                frequency: 0,
                rank: sibling as u16,
                tree: HuffmanTree::Leaf { symbol: sibling, frequency: 0 },
            });
        }

        let mut next_rank = 256_u16;

        while heap.len() > 1 {
            let least = heap.pop().expect("huffman heap underflow bug");
            let second = heap.pop().expect("huffman heap underflow bug");

            let frequency = least.frequency + second.frequency;
            heap.push(HeapNode {
                frequency,
                rank: next_rank,
                tree: HuffmanTree::Branch {
                    frequency,
                    left: Box::new(least.tree),
                    right: Box::new(second.tree),
                },
            });

            next_rank += 1;
        }

        heap.pop().map(|root| root.tree)
    }
}


/// Heap entry ordered by lowest frequency first, with the unique
/// rank breaking ties so that pop order never depends on heap internals.
struct HeapNode {
    frequency: u64,
    rank: u16,
    tree: HuffmanTree,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.frequency.cmp(&self.frequency)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency && self.rank == other.rank
    }
}

impl Eq for HeapNode {}


#[cfg(test)]
mod test {
    use super::*;

    fn tree_of(bytes: &[u8]) -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::count_bytes(bytes)).unwrap()
    }

    fn leaf_depth(tree: &HuffmanTree, symbol: u8, depth: usize) -> Option<usize> {
        match tree {
            HuffmanTree::Leaf { symbol: leaf_symbol, .. } =>
                if *leaf_symbol == symbol { Some(depth) } else { None },

            HuffmanTree::Branch { left, right, .. } =>
                leaf_depth(left, symbol, depth + 1)
                    .or_else(|| leaf_depth(right, symbol, depth + 1)),
        }
    }

    #[test]
    fn empty_alphabet_has_no_tree(){
        assert_eq!(HuffmanTree::from_frequencies(&FrequencyTable::new()), None);
    }

    #[test]
    fn branch_frequencies_are_sums(){
        fn check(tree: &HuffmanTree){
            if let HuffmanTree::Branch { frequency, left, right } = tree {
                assert_eq!(*frequency, left.frequency() + right.frequency());
                check(left);
                check(right);
            }
        }

        check(&tree_of(b"abracadabra"));
    }

    #[test]
    fn most_frequent_symbol_sits_highest(){
        let tree = tree_of(b"abracadabra");

        let depth_a = leaf_depth(&tree, b'a', 0).unwrap();
        for &other in b"brcd" {
            assert!(depth_a < leaf_depth(&tree, other, 0).unwrap());
        }
    }

    #[test]
    fn construction_is_deterministic(){
        // all four symbols have equal frequency, so only the
        // fixed tie-break decides the shape
        let bytes = b"ddccbbaa";
        assert_eq!(tree_of(bytes), tree_of(bytes));

        let again = HuffmanTree::from_frequencies(&FrequencyTable::count_bytes(bytes));
        assert_eq!(again.as_ref(), Some(&tree_of(bytes)));
    }

    #[test]
    fn single_symbol_still_gets_a_branch(){
        let tree = tree_of(b"aaaaaa");

        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(leaf_depth(&tree, b'a', 0), Some(1));
    }

    #[test]
    fn node_count_is_bounded_by_alphabet(){
        let bytes: Vec<u8> = (0 ..= 255_u8).chain(0 ..= 127_u8).collect();
        let tree = tree_of(&bytes);

        // a strict binary tree with n leaves has exactly 2n - 1 nodes
        assert_eq!(tree.leaf_count(), 256);
    }
}
