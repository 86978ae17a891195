//! Binary trie over the bits of a key.

mod map;
mod node;
mod tree;

pub use self::map::RadixTree;
