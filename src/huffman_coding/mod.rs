//! The huffman_coding module holds the codec engine: everything between a histogram of byte
//! counts and the bits that get packed onto the stream.
//!
//! - node: the tree node, a leaf with a symbol or an internal node owning two subtrees.
//! - priority_queue: nodes in ascending weight order, ties leaving in arrival order.
//! - huffman: builds the tree from a histogram, then the code table from the tree.
//! - bit_sequence: the bounded bit vector used as the traversal path and as each stored code.
//! - stack: the bounded node stack used when rebuilding a tree.
//! - tree_codec: writes a tree as a post-order token stream and rebuilds it again.
//!
//! The same histogram always gives the same tree, the same codes, and the same output bytes.
//!

pub mod bit_sequence;
pub mod huffman;
pub mod node;
pub mod priority_queue;
pub mod stack;
pub mod tree_codec;
