use super::node::Node;
use crate::error::{HuffError, Result};

/// Bounded LIFO of subtrees, used while rebuilding a tree from its token stream.
#[derive(Debug)]
pub struct NodeStack {
    items: Vec<Node>,
    capacity: usize,
}

impl NodeStack {
    /// Create a stack holding at most `capacity` nodes. The space is reserved up front.
    pub fn new(capacity: usize) -> Result<Self> {
        let mut items = Vec::new();
        items.try_reserve_exact(capacity)?;
        Ok(Self { items, capacity })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, node: Node) -> Result<()> {
        if self.items.len() == self.capacity {
            return Err(HuffError::Full {
                what: "node stack",
                capacity: self.capacity,
            });
        }
        self.items.push(node);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Node> {
        self.items.pop().ok_or(HuffError::Empty { what: "node stack" })
    }
}
