/// What a node holds: two owned subtrees, or the symbol of a leaf.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

/// A Huffman tree node. The whole tree is owned by its root and dropped with it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a leaf for `symbol` occurring `weight` times.
    pub fn leaf(symbol: u8, weight: u64) -> Node {
        Node {
            weight,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Join two subtrees under a new parent whose weight is the sum of both.
    pub fn join(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// The symbol of a leaf, None for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self.node_data {
            NodeData::Leaf(sym) => Some(sym),
            NodeData::Kids(..) => None,
        }
    }

    /// Count the leaves under (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match &self.node_data {
            NodeData::Leaf(_) => 1,
            NodeData::Kids(left, right) => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match &self.node_data {
            NodeData::Leaf(_) => 0,
            NodeData::Kids(left, right) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Compare tree shape and leaf symbols, ignoring weights. Serialized trees carry no weights,
    /// so this is the equality that survives a round trip.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (&self.node_data, &other.node_data) {
            (NodeData::Leaf(a), NodeData::Leaf(b)) => a == b,
            (NodeData::Kids(l1, r1), NodeData::Kids(l2, r2)) => {
                l1.same_shape(l2) && r1.same_shape(r2)
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for Node {
    /// Symbol and weight of the node. Unprintable symbols are shown by value.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node_data {
            NodeData::Leaf(sym) if sym.is_ascii_graphic() => {
                write!(f, "'{}': {}", sym as char, self.weight)
            }
            NodeData::Leaf(sym) => write!(f, "0x{:02x}: {}", sym, self.weight),
            NodeData::Kids(..) => write!(f, "(internal): {}", self.weight),
        }
    }
}
