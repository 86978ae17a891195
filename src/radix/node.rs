use crate::arena::Entry;

/// Number of children of every internal node: one for a zero bit and one for a one bit.
pub const FANOUT: usize = 2;

#[derive(Clone, Debug)]
pub struct Node<V> {
    pub value: Option<V>,
    pub children: Option<Entry>,
}

impl<V> Node<V> {
    pub fn new() -> Self {
        Node {
            value: None,
            children: None,
        }
    }

    pub fn new_children() -> [Node<V>; FANOUT] {
        [Node::new(), Node::new()]
    }
}
