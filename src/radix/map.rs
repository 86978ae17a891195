use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::error::Result;
use crate::key::Key;
use crate::radix::tree::Tree;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};

/// An associative map implemented using a binary trie over the bits of its keys.
///
/// Every byte of a key contributes eight levels to the path of the key, one per bit, starting
/// with the most significant bit. A zero bit descends into the left child of a node and a one bit
/// into the right child. Child arrays are allocated lazily the first time a path needs to go
/// deeper than the nodes that already exist, so keys that share a prefix share the nodes of that
/// prefix. The value of a key lives in the node at the end of its path.
///
/// Keys are only read while an operation runs and are never stored. Any type implementing `Key`
/// can be used: fixed-width integers contribute all of their bytes, while strings stop at their
/// first zero byte.
///
/// Removing a key only empties the slot of its node. Nodes are never pruned until the map is
/// cleared or dropped.
///
/// # Examples
///
/// ```
/// use bit_tries::radix::RadixTree;
///
/// let mut map = RadixTree::new();
/// map.insert("foo", 0).unwrap();
/// map.insert("foobar", 1).unwrap();
///
/// assert_eq!(map["foo"], 0);
/// assert_eq!(map.get("baz"), None);
/// assert_eq!(map.len(), 2);
///
/// map["foo"] = 2;
/// assert_eq!(map.remove("foo"), Some(2));
/// assert_eq!(map.len(), 1);
/// ```
pub struct RadixTree<K, V>
where
    K: Key + ?Sized,
{
    tree: Tree<V>,
    len: usize,
    _marker: PhantomData<fn(&K)>,
}

impl<K, V> RadixTree<K, V>
where
    K: Key + ?Sized,
{
    /// Constructs a new, empty `RadixTree<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let map: RadixTree<u32, u32> = RadixTree::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RadixTree<K, V>` whose nodes are allocated `chunk_size` child
    /// arrays at a time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let map: RadixTree<str, u32> = RadixTree::with_chunk_size(4096);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RadixTree {
            tree: Tree::new(chunk_size),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// replaced and the old value is returned. Returns `Error::OutOfMemory` if the nodes for the
    /// key cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map = RadixTree::new();
    /// assert_eq!(map.insert("foo", 1), Ok(None));
    /// assert_eq!(map.get("foo"), Some(&1));
    /// assert_eq!(map.insert("foo", 2), Ok(Some(1)));
    /// assert_eq!(map.get("foo"), Some(&2));
    /// ```
    pub fn insert(&mut self, key: &K, value: V) -> Result<Option<V>> {
        let node_ref = self.tree.find_or_create(key)?;
        let old_value = mem::replace(&mut self.tree.node_mut(node_ref).value, Some(value));
        if old_value.is_none() {
            self.len += 1;
        }
        Ok(old_value)
    }

    /// Returns a mutable reference to the value associated with a key, inserting the value
    /// returned by `f` first if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map = RadixTree::new();
    /// *map.get_or_insert_with(&7u64, || 1).unwrap() += 1;
    /// *map.get_or_insert_with(&7u64, || 1).unwrap() += 1;
    /// assert_eq!(map.get(&7), Some(&3));
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: &K, f: F) -> Result<&mut V>
    where
        F: FnOnce() -> V,
    {
        let node_ref = self.tree.find_or_create(key)?;
        let node = self.tree.node_mut(node_ref);
        if node.value.is_none() {
            self.len += 1;
        }
        Ok(node.value.get_or_insert_with(f))
    }

    /// Returns a mutable reference to the value associated with a key, inserting the default
    /// value first if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map: RadixTree<str, u32> = RadixTree::new();
    /// *map.get_or_default("foo").unwrap() += 5;
    /// assert_eq!(map.get("foo"), Some(&5));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn get_or_default(&mut self, key: &K) -> Result<&mut V>
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Removes a key from the map. If the key exists in the map, it will return the associated
    /// value. Otherwise it will return `None`. No nodes are deallocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map = RadixTree::new();
    /// map.insert("foo", 1).unwrap();
    /// assert_eq!(map.remove("foo"), Some(1));
    /// assert_eq!(map.remove("foo"), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node_ref = self.tree.find(key)?;
        let value = self.tree.node_mut(node_ref).value.take();
        if value.is_some() {
            self.len -= 1;
        }
        value
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map = RadixTree::new();
    /// map.insert("foo", 1).unwrap();
    /// assert!(map.contains_key("foo"));
    /// assert!(!map.contains_key("foobar"));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map = RadixTree::new();
    /// map.insert("foo", 1).unwrap();
    /// assert_eq!(map.get("foobar"), None);
    /// assert_eq!(map.get("foo"), Some(&1));
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let node_ref = self.tree.find(key)?;
        self.tree.node(node_ref).value.as_ref()
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map = RadixTree::new();
    /// map.insert("foo", 1).unwrap();
    /// *map.get_mut("foo").unwrap() = 2;
    /// assert_eq!(map.get("foo"), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node_ref = self.tree.find(key)?;
        self.tree.node_mut(node_ref).value.as_mut()
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map = RadixTree::new();
    /// map.insert("foo", 1).unwrap();
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let map: RadixTree<str, u32> = RadixTree::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of nodes currently allocated in the map, including the root and nodes
    /// that hold no value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map = RadixTree::new();
    /// assert_eq!(map.node_count(), 1);
    /// map.insert(&0u8, 1).unwrap();
    /// assert_eq!(map.node_count(), 17);
    /// ```
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Clears the map, deallocating every node below the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::radix::RadixTree;
    ///
    /// let mut map = RadixTree::new();
    /// map.insert("foo", 1).unwrap();
    /// map.insert("foobar", 2).unwrap();
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// assert_eq!(map.node_count(), 1);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }
}

impl<K, V> Clone for RadixTree<K, V>
where
    K: Key + ?Sized,
    V: Clone,
{
    fn clone(&self) -> Self {
        RadixTree {
            tree: self.tree.clone(),
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<K, V> fmt::Debug for RadixTree<K, V>
where
    K: Key + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RadixTree")
            .field("len", &self.len)
            .field("node_count", &self.node_count())
            .finish()
    }
}

impl<K, V> Default for RadixTree<K, V>
where
    K: Key + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> Index<&'a K> for RadixTree<K, V>
where
    K: Key + ?Sized,
{
    type Output = V;

    fn index(&self, key: &'a K) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V> IndexMut<&'a K> for RadixTree<K, V>
where
    K: Key + ?Sized,
{
    fn index_mut(&mut self, key: &'a K) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}
