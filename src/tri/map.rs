use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::error::Result;
use crate::key::Key;
use crate::tri::tree::Tree;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};

/// An associative map implemented using a ternary search trie whose comparisons are made bit by
/// bit.
///
/// Each node below the root is claimed by the key byte that first reaches it. Looking up a byte
/// at a node compares it with the claimed byte one bit at a time, starting with the most
/// significant bit, and stops at the first bit where they differ: a smaller byte continues in the
/// `less` child and a greater byte in the `greater` child, both at the same key position, while an
/// equal byte is consumed and the walk continues in the `equal` child with the next key byte.
/// Child arrays of three nodes are allocated lazily, so keys that share a prefix share the chain
/// of `equal` nodes for that prefix.
///
/// Moving to a `less` or `greater` child never consumes a key byte; only an `equal` step does.
/// The bits of a byte are compared inside a single node rather than spread over eight levels, so
/// the path of a key has exactly one `equal` step per key byte. Compared to `RadixTree`, a key
/// costs one child array per byte instead of eight, at the price of three slots per child array
/// instead of two.
///
/// Keys are only read while an operation runs and are never stored. Removing a key only empties
/// the slot of its node. Nodes are never pruned until the map is cleared or dropped.
///
/// # Examples
///
/// ```
/// use bit_tries::tri::TriTree;
///
/// let mut map = TriTree::new();
/// map.insert("cat", 0).unwrap();
/// map.insert("cab", 1).unwrap();
/// map.insert("car", 2).unwrap();
///
/// assert_eq!(map["cab"], 1);
/// assert_eq!(map.get("ca"), None);
/// assert_eq!(map.len(), 3);
///
/// map["car"] += 10;
/// assert_eq!(map.remove("car"), Some(12));
/// assert_eq!(map.len(), 2);
/// ```
pub struct TriTree<K, V>
where
    K: Key + ?Sized,
{
    tree: Tree<V>,
    len: usize,
    _marker: PhantomData<fn(&K)>,
}

impl<K, V> TriTree<K, V>
where
    K: Key + ?Sized,
{
    /// Constructs a new, empty `TriTree<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::tri::TriTree;
    ///
    /// let map: TriTree<u32, u32> = TriTree::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `TriTree<K, V>` whose nodes are allocated `chunk_size` child
    /// arrays at a time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::tri::TriTree;
    ///
    /// let map: TriTree<str, u32> = TriTree::with_chunk_size(4096);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        TriTree {
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map = TriTree::new();
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map = TriTree::new();
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map: TriTree<str, u32> = TriTree::new();
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map = TriTree::new();
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map = TriTree::new();
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map = TriTree::new();
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map = TriTree::new();
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map = TriTree::new();
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let map: TriTree<str, u32> = TriTree::new();
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
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map = TriTree::new();
    /// assert_eq!(map.node_count(), 1);
    /// map.insert(&0u8, 1).unwrap();
    /// assert_eq!(map.node_count(), 4);
    /// ```
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    /// Clears the map, deallocating every node below the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::tri::TriTree;
    ///
    /// let mut map = TriTree::new();
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

impl<K, V> Clone for TriTree<K, V>
where
    K: Key + ?Sized,
    V: Clone,
{
    fn clone(&self) -> Self {
        TriTree {
            tree: self.tree.clone(),
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<K, V> fmt::Debug for TriTree<K, V>
where
    K: Key + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TriTree")
            .field("len", &self.len)
            .field("node_count", &self.node_count())
            .finish()
    }
}

impl<K, V> Default for TriTree<K, V>
where
    K: Key + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> Index<&'a K> for TriTree<K, V>
where
    K: Key + ?Sized,
{
    type Output = V;

    fn index(&self, key: &'a K) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V> IndexMut<&'a K> for TriTree<K, V>
where
    K: Key + ?Sized,
{
    fn index_mut(&mut self, key: &'a K) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::TriTree;
    use crate::error::Error;

    #[test]
    fn test_len_empty() {
        let map: TriTree<str, u32> = TriTree::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(!map.contains_key(""));
        assert_eq!(map.get("a"), None);
    }

    #[test]
    fn test_insert() {
        let mut map = TriTree::new();
        assert_eq!(map.insert("m", 0), Ok(None));
        assert_eq!(map.insert("a", 1), Ok(None));
        assert_eq!(map.insert("z", 2), Ok(None));
        assert_eq!(map.insert("ma", 3), Ok(None));
        assert_eq!(map.insert("mz", 4), Ok(None));
        assert_eq!(map.len(), 5);

        assert_eq!(map.get("m"), Some(&0));
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("z"), Some(&2));
        assert_eq!(map.get("ma"), Some(&3));
        assert_eq!(map.get("mz"), Some(&4));
        assert_eq!(map.get("mm"), None);
        assert_eq!(map.get("b"), None);
        assert_eq!(map.get("maa"), None);
    }

    #[test]
    fn test_insert_replace() {
        let mut map = TriTree::new();
        assert_eq!(map.insert(&42u32, 0), Ok(None));
        assert_eq!(map.insert(&42u32, 1), Ok(Some(0)));
        assert_eq!(map.get(&42), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_claimed_nodes_are_reused() {
        let mut map = TriTree::new();
        map.insert("b", 0).unwrap();
        assert_eq!(map.node_count(), 4);

        // claims the `less` child and allocates the children of "b"
        map.insert("a", 1).unwrap();
        assert_eq!(map.node_count(), 7);

        // claims the remaining `greater` and `equal` children of "b"
        map.insert("c", 2).unwrap();
        map.insert("ba", 3).unwrap();
        assert_eq!(map.node_count(), 7);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&0));
        assert_eq!(map.get("c"), Some(&2));
        assert_eq!(map.get("ba"), Some(&3));
        assert_eq!(map.get("bb"), None);
        assert_eq!(map.get("d"), None);
    }

    #[test]
    fn test_out_of_memory() {
        let mut map: TriTree<u32, u32> = TriTree::with_chunk_size(usize::MAX);
        assert!(matches!(map.insert(&1, 1), Err(Error::OutOfMemory(_))));
        assert!(matches!(map.get_or_default(&2), Err(Error::OutOfMemory(_))));
        assert!(matches!(
            map.get_or_insert_with(&3, || 3),
            Err(Error::OutOfMemory(_))
        ));
        assert_eq!(map.len(), 0);
        assert!(!map.contains_key(&1));
        assert!(!map.contains_key(&2));
        assert_eq!(map.node_count(), 1);

        // the empty key lives in the root and needs no allocation
        let mut map: TriTree<str, u32> = TriTree::with_chunk_size(usize::MAX);
        assert_eq!(map.insert("", 1), Ok(None));
        assert!(map.insert("a", 2).is_err());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(""), Some(&1));
        assert!(!map.contains_key("a"));
    }

    #[test]
    fn test_one_equal_step_per_byte() {
        let mut map = TriTree::new();
        map.insert("abcd", 0).unwrap();
        assert_eq!(map.node_count(), 1 + 4 * 3);

        map.insert("abcde", 1).unwrap();
        assert_eq!(map.node_count(), 1 + 5 * 3);

        // "abce" branches off "abcd" at the fourth byte without consuming it
        map.insert("abce", 2).unwrap();
        assert_eq!(map.node_count(), 1 + 5 * 3);
        assert_eq!(map.get("abce"), Some(&2));
        assert_eq!(map.get("abcd"), Some(&0));
        assert_eq!(map.get("abcde"), Some(&1));

        map.insert("abcf", 3).unwrap();
        assert_eq!(map.node_count(), 1 + 6 * 3);
        assert_eq!(map.get("abcf"), Some(&3));
    }

    #[test]
    fn test_empty_key() {
        let mut map = TriTree::new();
        assert_eq!(map.insert("", 1), Ok(None));
        assert_eq!(map.get(""), Some(&1));
        assert_eq!(map.node_count(), 1);
        assert_eq!(map.get_or_default("").map(|value| *value), Ok(1));
        assert_eq!(map.remove(""), Some(1));
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut map = TriTree::new();
        map.insert("abc", 0).unwrap();
        map.insert("abd", 1).unwrap();
        map.insert("ab", 2).unwrap();

        assert_eq!(map.remove("a"), None);
        assert_eq!(map.remove("abcd"), None);
        assert_eq!(map.len(), 3);

        let node_count = map.node_count();
        assert_eq!(map.remove("ab"), Some(2));
        assert_eq!(map.remove("ab"), None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.node_count(), node_count);
        assert_eq!(map.get("abc"), Some(&0));
        assert_eq!(map.get("abd"), Some(&1));
    }

    #[test]
    fn test_get_mut() {
        let mut map = TriTree::new();
        map.insert("a", 1).unwrap();
        *map.get_mut("a").unwrap() = 3;
        assert_eq!(map.get("a"), Some(&3));
        assert_eq!(map.get_mut("b"), None);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map = TriTree::new();
        assert_eq!(*map.get_or_insert_with("a", || 1).unwrap(), 1);
        assert_eq!(*map.get_or_insert_with("a", || 2).unwrap(), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_wide_keys() {
        let mut map: TriTree<[u16], u32> = TriTree::new();
        let hello: Vec<u16> = "hello".encode_utf16().collect();
        let help: Vec<u16> = "help".encode_utf16().collect();
        map.insert(&hello, 1).unwrap();
        map.insert(&help, 2).unwrap();
        assert_eq!(map.get(&hello), Some(&1));
        assert_eq!(map.get(&help), Some(&2));
        assert_eq!(map.get(&hello[..3]), None);
    }

    #[test]
    #[should_panic]
    fn test_index_missing() {
        let map: TriTree<u64, u32> = TriTree::new();
        let _ = map[&0];
    }

    #[test]
    fn test_clear() {
        let mut map = TriTree::new();
        map.insert("foo", 1).unwrap();
        map.insert("bar", 2).unwrap();
        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.node_count(), 1);
        assert!(!map.contains_key("foo"));
        assert!(!map.contains_key("bar"));

        map.insert("bar", 3).unwrap();
        assert_eq!(map.get("bar"), Some(&3));
        assert_eq!(map.get("foo"), None);
    }

    #[test]
    fn test_clone() {
        let mut map = TriTree::new();
        map.insert("foo", 1).unwrap();
        let mut cloned = map.clone();
        cloned.remove("foo");
        cloned.insert("bar", 3).unwrap();

        assert_eq!(map.get("foo"), Some(&1));
        assert_eq!(map.get("bar"), None);
        assert_eq!(cloned.get("foo"), None);
        assert_eq!(cloned.get("bar"), Some(&3));
        assert_eq!(cloned.len(), 1);
    }

    #[test]
    fn test_debug() {
        let mut map = TriTree::new();
        map.insert("a", 1).unwrap();
        assert_eq!(format!("{:?}", map), "TriTree { len: 1, node_count: 4 }");
    }
}
