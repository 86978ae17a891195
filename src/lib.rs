//! Binary and ternary prefix trees keyed by the raw bits of their keys.
//!
//! Both trees expose the same map-like surface and differ only in how a key is turned into a
//! path: `radix::RadixTree` spends one level per key bit with two children per node, while
//! `tri::TriTree` is a ternary search trie whose nodes compare key bytes bit by bit.

pub mod arena;
pub mod error;
pub mod key;
pub mod radix;
pub mod tri;

pub use crate::error::{Error, Result};
pub use crate::key::Key;
