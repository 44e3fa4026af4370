use std::collections::VecDeque;

use super::node::Node;
use crate::error::{HuffError, Result};

/// Nodes kept in ascending weight order. Nodes of equal weight leave in the order they arrived,
/// which keeps tree construction (and so every code) reproducible.
///
/// The queue never holds more than one node per symbol, so insertion by linear scan is fine.
#[derive(Debug)]
pub struct PriorityQueue {
    nodes: VecDeque<Node>,
    capacity: usize,
}

impl PriorityQueue {
    /// Create an empty queue holding at most `capacity` nodes. The space is reserved up front.
    pub fn new(capacity: usize) -> Result<Self> {
        let mut nodes = VecDeque::new();
        nodes.try_reserve_exact(capacity)?;
        Ok(Self { nodes, capacity })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.nodes.len() == self.capacity
    }

    /// Insert a node after every node of lower or equal weight.
    pub fn enqueue(&mut self, node: Node) -> Result<()> {
        if self.is_full() {
            return Err(HuffError::Full {
                what: "priority queue",
                capacity: self.capacity,
            });
        }
        // Scan from the back: newly joined nodes are usually the heaviest
        let mut idx = self.nodes.len();
        while idx > 0 && self.nodes[idx - 1].weight > node.weight {
            idx -= 1;
        }
        self.nodes.insert(idx, node);
        Ok(())
    }

    /// Remove the lightest node (the earliest arrival among equals).
    pub fn dequeue(&mut self) -> Result<Node> {
        self.nodes.pop_front().ok_or(HuffError::Empty {
            what: "priority queue",
        })
    }

    /// Weights front to back, for debugging.
    pub fn weights(&self) -> Vec<u64> {
        self.nodes.iter().map(|n| n.weight).collect()
    }
}
