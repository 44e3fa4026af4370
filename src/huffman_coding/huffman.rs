use log::{debug, trace};

use super::bit_sequence::BitSequence;
use super::node::{Node, NodeData};
use super::priority_queue::PriorityQueue;
use crate::error::Result;

/// Number of distinct symbols: every byte value.
pub const ALPHABET: usize = 256;

/// One code per byte value, indexed by the byte. Symbols absent from the tree have empty codes.
pub type CodeTable = Vec<BitSequence>;

/// Build a Huffman tree from a histogram of byte counts.
///
/// Symbols 0 and 1 are forced to a count of at least 1 first. That guarantees two leaves even for
/// an empty input or an input of a single repeated byte, so the root is always internal and no
/// symbol gets a zero-length code.
///
/// Leaves are queued in symbol order. Each round takes the two lightest subtrees (first is the
/// left child, second the right) and queues their join, until one node is left: the root.
pub fn build_tree(counts: &[u64; ALPHABET]) -> Result<Node> {
    let mut counts = *counts;
    for sym in 0..2 {
        if counts[sym] == 0 {
            counts[sym] = 1;
        }
    }

    let symbols = counts.iter().filter(|&&c| c > 0).count();
    let mut pq = PriorityQueue::new(symbols)?;
    for (sym, &count) in counts.iter().enumerate() {
        if count > 0 {
            pq.enqueue(Node::leaf(sym as u8, count))?;
        }
    }
    trace!("Initial queue weights: {:?}", pq.weights());

    while pq.len() >= 2 {
        let left = pq.dequeue()?;
        let right = pq.dequeue()?;
        pq.enqueue(Node::join(left, right))?;
    }
    let root = pq.dequeue()?;

    debug!(
        "Built tree with {} leaves, depth {}, total weight {}.",
        symbols,
        root.depth(),
        root.weight
    );
    Ok(root)
}

/// Derive the code of every leaf in the tree: the path from the root, 0 for left and 1 for right.
pub fn build_codes(root: &Node) -> Result<CodeTable> {
    let mut table = vec![BitSequence::default(); ALPHABET];
    // No path is longer than one less than the number of leaves
    let mut path = BitSequence::with_capacity(root.leaf_count().saturating_sub(1).max(1));
    walk(root, &mut path, &mut table)?;
    Ok(table)
}

/// Depth-first walk that leaves `path` as it found it.
fn walk(node: &Node, path: &mut BitSequence, table: &mut CodeTable) -> Result<()> {
    match &node.node_data {
        NodeData::Leaf(sym) => {
            table[*sym as usize] = path.clone();
        }
        NodeData::Kids(left, right) => {
            path.push_bit(false)?;
            walk(left, path, table)?;
            path.pop_bit();
            path.push_bit(true)?;
            walk(right, path, table)?;
            path.pop_bit();
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{build_codes, build_tree, ALPHABET};
    use crate::huffman_coding::node::{Node, NodeData};

    fn counts_of(data: &[u8]) -> [u64; ALPHABET] {
        let mut counts = [0; ALPHABET];
        data.iter().for_each(|&b| counts[b as usize] += 1);
        counts
    }

    /// Every internal node must have two children and every leaf none. The enum enforces the
    /// first half, so check the symbols are unique and the weights add up.
    fn check_tree(node: &Node, seen: &mut [bool; ALPHABET]) -> u64 {
        match &node.node_data {
            NodeData::Leaf(sym) => {
                assert!(!seen[*sym as usize], "symbol {} appears twice", sym);
                seen[*sym as usize] = true;
                node.weight
            }
            NodeData::Kids(left, right) => {
                let w = check_tree(left, seen) + check_tree(right, seen);
                assert_eq!(w, node.weight);
                w
            }
        }
    }

    #[test]
    fn empty_input_test() {
        let root = build_tree(&[0; ALPHABET]).unwrap();
        assert_eq!(root.leaf_count(), 2);
        assert_eq!(root.weight, 2);
        let codes = build_codes(&root).unwrap();
        assert_eq!(codes[0].len(), 1);
        assert_eq!(codes[1].len(), 1);
        assert_eq!(codes[0].get(0), Some(false));
        assert_eq!(codes[1].get(0), Some(true));
        assert!(codes[2..].iter().all(|c| c.is_empty()));
    }

    #[test]
    fn four_a_test() {
        let root = build_tree(&counts_of(b"AAAA")).unwrap();
        assert_eq!(root.leaf_count(), 3);
        // 0 and 1 merge first; the join (2) is lighter than 'A' (4) so it goes left
        match &root.node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(left.weight, 2);
                assert_eq!(right.symbol(), Some(b'A'));
            }
            NodeData::Leaf(_) => panic!("root is a leaf"),
        }
        let codes = build_codes(&root).unwrap();
        assert_eq!(codes[b'A' as usize].to_string(), "1");
        assert_eq!(codes[0].to_string(), "00");
        assert_eq!(codes[1].to_string(), "01");
    }

    #[test]
    fn tree_validity_test() {
        let data = b"this is an example of a huffman tree, with some repeated letters eeee";
        let root = build_tree(&counts_of(data)).unwrap();
        let mut seen = [false; ALPHABET];
        let total = check_tree(&root, &mut seen);
        // The two seeded symbols add one each
        assert_eq!(total, data.len() as u64 + 2);
    }

    #[test]
    fn deterministic_test() {
        let counts = counts_of(b"abracadabra, abracadabra!");
        let a = build_tree(&counts).unwrap();
        let b = build_tree(&counts).unwrap();
        assert_eq!(a, b);
        assert_eq!(build_codes(&a).unwrap(), build_codes(&b).unwrap());
    }

    #[test]
    fn prefix_free_test() {
        let data: Vec<u8> = (0..=255u8)
            .flat_map(|b| std::iter::repeat(b).take(1 + (b as usize % 17)))
            .collect();
        let root = build_tree(&counts_of(&data)).unwrap();
        let codes = build_codes(&root).unwrap();
        for (i, a) in codes.iter().enumerate() {
            assert!(!a.is_empty(), "symbol {} has an empty code", i);
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{} is a prefix of {}", i, j);
                }
            }
        }
    }

    #[test]
    fn code_length_is_depth_test() {
        // Doubling weights give a maximally skewed tree
        let mut counts = [0; ALPHABET];
        for (i, c) in counts.iter_mut().take(12).enumerate() {
            *c = 1 << i;
        }
        let root = build_tree(&counts).unwrap();
        assert_eq!(root.depth(), 11);
        let codes = build_codes(&root).unwrap();
        assert_eq!(codes[11].len(), 1);
        assert_eq!(codes[0].len(), 11);
        assert_eq!(codes[1].len(), 11);
    }

    #[test]
    fn optimal_length_test() {
        // Weights 1,1,2,4: every code length is forced
        let mut counts = [0; ALPHABET];
        counts[0] = 1;
        counts[1] = 1;
        counts[2] = 2;
        counts[3] = 4;
        let codes = build_codes(&build_tree(&counts).unwrap()).unwrap();
        let bits: usize = (0..4).map(|s| codes[s].len() * counts[s] as usize).sum();
        assert_eq!(bits, 3 + 3 + 2 * 2 + 4);
    }
}
