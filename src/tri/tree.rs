use crate::arena::{Entry, TypedArena};
use crate::error::Result;
use crate::key::{self, Key};
use crate::tri::node::{Node, EQUAL, FANOUT, GREATER, LESS};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeRef {
    Root,
    Child(Entry, usize),
}

/// The node graph of a `TriTree`.
///
/// The root represents the empty key and never carries a pattern. Every other node is claimed by
/// the first key byte that reaches it and keeps that pattern for its whole life. The `less` and
/// `greater` children of a node hold bytes at the same key position that compare below or above
/// its pattern, and the `equal` child starts the next key position. Non-root nodes without a
/// pattern have neither a value nor children.
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

    /// Follows the path of `key` without creating or claiming nodes.
    pub fn find<K>(&self, key: &K) -> Option<NodeRef>
    where
        K: Key + ?Sized,
    {
        let mut curr = NodeRef::Root;
        let mut index = 0;
        while let Some(byte) = key.byte_at(index) {
            curr = NodeRef::Child(self.node(curr).children?, EQUAL);
            loop {
                let node = self.node(curr);
                let direction = match key::compare_bits(byte, node.pattern?) {
                    Ordering::Less => LESS,
                    Ordering::Equal => break,
                    Ordering::Greater => GREATER,
                };
                curr = NodeRef::Child(node.children?, direction);
            }
            index += 1;
        }
        Some(curr)
    }

    /// Follows the path of `key`, allocating child arrays and claiming unclaimed nodes with the
    /// key byte that reaches them.
    pub fn find_or_create<K>(&mut self, key: &K) -> Result<NodeRef>
    where
        K: Key + ?Sized,
    {
        let mut curr = NodeRef::Root;
        let mut index = 0;
        while let Some(byte) = key.byte_at(index) {
            curr = NodeRef::Child(self.children_or_allocate(curr)?, EQUAL);
            loop {
                let pattern = self.node(curr).pattern;
                let direction = match pattern {
                    None => {
                        self.node_mut(curr).pattern = Some(byte);
                        break;
                    }
                    Some(pattern) => match key::compare_bits(byte, pattern) {
                        Ordering::Less => LESS,
                        Ordering::Equal => break,
                        Ordering::Greater => GREATER,
                    },
                };
                curr = NodeRef::Child(self.children_or_allocate(curr)?, direction);
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
