use crate::arena::{Entry, TypedArena};
use crate::error::Result;
use crate::key::{self, Key, BITS_PER_BYTE};
use crate::radix::node::{Node, FANOUT};

/// Location of a node: the embedded root, or one slot of a child array in the arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeRef {
    Root,
    Child(Entry, usize),
}

/// The node graph of a `RadixTree`: an embedded root plus every child array below it.
#[derive(Clone, Debug)]
pub struct Tree<V> {
    root: Node<V>,
    arena: TypedArena<[Node<V>; FANOUT]>,
}

impl<V> Tree<V> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            root: Node::new(),
            arena: TypedArena::new(chunk_size),
        }
    }

    pub fn node(&self, node_ref: NodeRef) -> &Node<V> {
        match node_ref {
            NodeRef::Root => &self.root,
            NodeRef::Child(entry, index) => &self.arena[entry][index],
        }
    }

    pub fn node_mut(&mut self, node_ref: NodeRef) -> &mut Node<V> {
        match node_ref {
            NodeRef::Root => &mut self.root,
            NodeRef::Child(entry, index) => &mut self.arena[entry][index],
        }
    }

    fn children_or_allocate(&mut self, node_ref: NodeRef) -> Result<Entry> {
        if let Some(children) = self.node(node_ref).children {
            return Ok(children);
        }
        let children = self.arena.try_allocate(Node::new_children())?;
        self.node_mut(node_ref).children = Some(children);
        Ok(children)
    }

    /// Follows the path of `key` without creating nodes.
    pub fn find<K>(&self, key: &K) -> Option<NodeRef>
    where
        K: Key + ?Sized,
    {
        let mut curr = NodeRef::Root;
        let mut index = 0;
        while let Some(byte) = key.byte_at(index) {
            for bit_index in 0..BITS_PER_BYTE {
                let children = self.node(curr).children?;
                curr = NodeRef::Child(children, usize::from(key::bit(byte, bit_index)));
            }
            index += 1;
        }
        Some(curr)
    }

    /// Follows the path of `key`, allocating child arrays wherever the path is not materialized
    /// yet. On failure the nodes linked so far stay in place, empty.
    pub fn find_or_create<K>(&mut self, key: &K) -> Result<NodeRef>
    where
        K: Key + ?Sized,
    {
        let mut curr = NodeRef::Root;
        let mut index = 0;
        while let Some(byte) = key.byte_at(index) {
            for bit_index in 0..BITS_PER_BYTE {
                let children = self.children_or_allocate(curr)?;
                curr = NodeRef::Child(children, usize::from(key::bit(byte, bit_index)));
            }
            index += 1;
        }
        Ok(curr)
    }

    pub fn node_count(&self) -> usize {
        1 + self.arena.len() * FANOUT
    }

    pub fn clear(&mut self) {
        self.root = Node::new();
        self.arena.clear();
    }
}
