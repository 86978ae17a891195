use crate::arena::Entry;

/// Number of children of every internal node: `less`, `equal` and `greater`.
pub const FANOUT: usize = 3;

/// Child for a byte below the node's pattern, at the same key position.
pub const LESS: usize = 0;
/// Child for the next key byte once a byte matched the node's pattern.
pub const EQUAL: usize = 1;
/// Child for a byte above the node's pattern, at the same key position.
pub const GREATER: usize = 2;

#[derive(Clone, Debug)]
pub struct Node<V> {
    /// The key byte that claimed this node. `None` until a key first reaches the node.
    pub pattern: Option<u8>,
    pub value: Option<V>,
    pub children: Option<Entry>,
}

impl<V> Node<V> {
    pub fn new() -> Self {
        Node {
            pattern: None,
            value: None,
            children: None,
        }
    }

    pub fn new_children() -> [Node<V>; FANOUT] {
        [Node::new(), Node::new(), Node::new()]
    }
}
