//! Tree serialization.
//!
//! The tree is written post-order: left subtree, right subtree, then the node itself. A leaf is
//! two bytes, `L` and its symbol. An internal node is the single byte `I`; its children are the
//! two subtrees that immediately precede it, so no pointers are needed. A tree with `u` leaves
//! always serializes to exactly `3u - 1` bytes.

use log::trace;

use super::node::{Node, NodeData};
use super::stack::NodeStack;
use crate::error::{HuffError, Result};

pub const LEAF_TOKEN: u8 = b'L';
pub const INTERNAL_TOKEN: u8 = b'I';

/// Length of the serialized form of a tree with `leaves` leaves.
pub fn tree_size(leaves: usize) -> usize {
    (3 * leaves).saturating_sub(1)
}

/// Serialize a tree to its token stream.
pub fn dump_tree(root: &Node) -> Vec<u8> {
    let mut out = Vec::with_capacity(tree_size(root.leaf_count()));
    dump_node(root, &mut out);
    out
}

fn dump_node(node: &Node, out: &mut Vec<u8>) {
    match &node.node_data {
        NodeData::Leaf(sym) => {
            out.push(LEAF_TOKEN);
            out.push(*sym);
        }
        NodeData::Kids(left, right) => {
            dump_node(left, out);
            dump_node(right, out);
            out.push(INTERNAL_TOKEN);
        }
    }
}

/// Rebuild a tree from its token stream. Rebuilt leaves have weight 0: only the shape and the
/// symbols are stored.
pub fn rebuild_tree(tokens: &[u8]) -> Result<Node> {
    if tokens.is_empty() {
        return Err(HuffError::corrupt("empty tree"));
    }
    let mut stack = NodeStack::new(tokens.len())?;
    let mut leaves = 0;

    let mut iter = tokens.iter().enumerate();
    while let Some((pos, &token)) = iter.next() {
        match token {
            LEAF_TOKEN => {
                let (_, &sym) = iter.next().ok_or_else(|| {
                    HuffError::corrupt(format!("leaf token at {} has no symbol", pos))
                })?;
                stack.push(Node::leaf(sym, 0))?;
                leaves += 1;
            }
            INTERNAL_TOKEN => {
                // The most recently finished subtree is the right child
                let (right, left) = match (stack.pop(), stack.pop()) {
                    (Ok(right), Ok(left)) => (right, left),
                    _ => {
                        return Err(HuffError::corrupt(format!(
                            "internal node at {} is missing a child",
                            pos
                        )))
                    }
                };
                stack.push(Node::join(left, right))?;
            }
            other => {
                return Err(HuffError::corrupt(format!(
                    "unknown tree token 0x{:02x} at {}",
                    other, pos
                )))
            }
        }
    }

    if stack.len() != 1 {
        return Err(HuffError::corrupt(format!(
            "tree stream left {} subtrees instead of one",
            stack.len()
        )));
    }
    if tokens.len() != tree_size(leaves) {
        return Err(HuffError::corrupt(format!(
            "tree of {} leaves should be {} bytes, found {}",
            leaves,
            tree_size(leaves),
            tokens.len()
        )));
    }
    trace!("Rebuilt tree of {} leaves from {} bytes.", leaves, tokens.len());
    stack.pop()
}
