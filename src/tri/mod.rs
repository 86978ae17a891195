//! Ternary search trie over the bytes of a key, compared bit by bit.

mod map;
mod node;
mod tree;

pub use self::map::TriTree;
