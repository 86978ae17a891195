//! Append-only chunked allocator for tree nodes.

use crate::error::Result;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// Number of objects per chunk used by the trees unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// A handle to an object allocated in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Entry {
    chunk_index: usize,
    block_index: usize,
}

/// An allocator that only allocates a single type of object and never frees them individually.
///
/// Objects are stored in fixed-size chunks so that growing the arena never moves previously
/// allocated objects, and entries stay valid until the arena is cleared. Memory for a new chunk
/// is reserved fallibly: if the allocator cannot satisfy the request, `try_allocate` returns
/// `Error::OutOfMemory` and the arena is left untouched. All objects are dropped when the arena
/// is cleared or dropped, which is how the trees tear down entire subtrees without recursion.
///
/// # Examples
///
/// ```
/// use bit_tries::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
/// assert_eq!(arena.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TypedArena<T> {
    chunks: Vec<Vec<T>>,
    chunk_size: usize,
    size: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_entry(&self, entry: &Entry) -> bool {
        entry.chunk_index < self.chunks.len()
            && entry.block_index < self.chunks[entry.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk. A
    /// chunk size of zero is rounded up to one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::arena::TypedArena;
    ///
    /// // creates a new TypedArena<T> that contains a maximum of 1024 u32's per chunk
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        TypedArena {
            chunks: Vec::new(),
            chunk_size: chunk_size.max(1),
            size: 0,
        }
    }

    /// Allocates an object in the typed arena and returns an `Entry`. Returns
    /// `Error::OutOfMemory` if a new chunk is needed and cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.try_allocate(0).unwrap();
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn try_allocate(&mut self, value: T) -> Result<Entry> {
        let needs_chunk = match self.chunks.last() {
            Some(chunk) => chunk.len() == self.chunk_size,
            None => true,
        };
        if needs_chunk {
            let mut chunk = Vec::new();
            chunk.try_reserve_exact(self.chunk_size)?;
            self.chunks.try_reserve(1)?;
            self.chunks.push(chunk);
        }

        let chunk_index = self.chunks.len() - 1;
        let last_chunk = &mut self.chunks[chunk_index];
        last_chunk.push(value);
        self.size += 1;
        Ok(Entry {
            chunk_index,
            block_index: last_chunk.len() - 1,
        })
    }

    /// Allocates an object in the typed arena and returns an `Entry`.
    ///
    /// # Panics
    ///
    /// Panics if the arena runs out of memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Entry {
        match self.try_allocate(value) {
            Ok(entry) => entry,
            Err(error) => panic!("Error: {}.", error),
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the entry
    /// does not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, entry: &Entry) -> Option<&T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        Some(&self.chunks[entry.chunk_index][entry.block_index])
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the entry
    /// does not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(&x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, entry: &Entry) -> Option<&mut T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        Some(&mut self.chunks[entry.chunk_index][entry.block_index])
    }

    /// Drops every object in the arena and releases its chunks. Entries handed out before the
    /// call are invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_tries::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert_eq!(arena.get(&x), None);
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.size = 0;
    }

    /// Returns the number of objects allocated in the arena.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if no objects are allocated in the arena.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of objects the arena can hold before it needs another chunk.
    pub fn capacity(&self) -> usize {
        self.chunks.len() * self.chunk_size
    }
}

impl<T> Index<Entry> for TypedArena<T> {
    type Output = T;

    fn index(&self, entry: Entry) -> &Self::Output {
        self.get(&entry).expect("Error: entry out of bounds.")
    }
}

impl<T> IndexMut<Entry> for TypedArena<T> {
    fn index_mut(&mut self, entry: Entry) -> &mut Self::Output {
        self.get_mut(&entry).expect("Error: entry out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;
    use super::TypedArena;
    use crate::error::Error;

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new(1024);
        assert_eq!(
            arena.allocate(0),
            Entry {
                chunk_index: 0,
                block_index: 0
            },
        );
        assert_eq!(
            arena.allocate(0),
            Entry {
                chunk_index: 0,
                block_index: 1
            },
        );
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.capacity(), 1024);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        arena.allocate(0);
        arena.allocate(1);
        assert_eq!(
            arena.try_allocate(2),
            Ok(Entry {
                chunk_index: 1,
                block_index: 0
            }),
        );
        assert_eq!(arena.capacity(), 4);
    }

    #[test]
    fn test_try_allocate_out_of_memory() {
        let mut arena: TypedArena<[u64; 2]> = TypedArena::new(usize::MAX);
        assert!(matches!(
            arena.try_allocate([1, 2]),
            Err(Error::OutOfMemory(_))
        ));
        assert!(arena.is_empty());
        assert_eq!(arena.capacity(), 0);
        assert_eq!(
            arena.get(&Entry {
                chunk_index: 0,
                block_index: 0
            }),
            None,
        );
    }

    #[test]
    #[should_panic]
    fn test_allocate_out_of_memory() {
        let mut arena: TypedArena<u64> = TypedArena::new(usize::MAX);
        arena.allocate(0);
    }

    #[test]
    fn test_zero_chunk_size() {
        let mut arena = TypedArena::new(0);
        let x = arena.allocate(7);
        let y = arena.allocate(8);
        assert_eq!(arena[x], 7);
        assert_eq!(arena[y], 8);
        assert_eq!(arena.capacity(), 2);
    }

    #[test]
    fn test_entries_survive_growth() {
        let mut arena = TypedArena::new(4);
        let entries: Vec<Entry> = (0..100).map(|i| arena.allocate(i)).collect();
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(arena.get(entry), Some(&i));
        }
    }

    #[test]
    fn test_get_invalid_block() {
        let arena: TypedArena<u32> = TypedArena::new(1024);
        assert_eq!(
            arena.get(&Entry {
                chunk_index: 0,
                block_index: 0
            }),
            None,
        );
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let entry = arena.allocate(0);
        *arena.get_mut(&entry).unwrap() = 1;
        assert_eq!(arena.get(&entry), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(1024);
        let entry = arena.allocate(0);
        arena.clear();
        assert_eq!(arena.get(&entry), None);
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.allocate(1), entry);
    }

    #[test]
    fn test_clone() {
        let mut arena = TypedArena::new(1024);
        let entry = arena.allocate(String::from("foo"));
        let mut cloned = arena.clone();
        cloned[entry].push_str("bar");
        assert_eq!(arena[entry], "foo");
        assert_eq!(cloned[entry], "foobar");
    }

    #[test]
    #[should_panic]
    fn test_index_invalid_block() {
        let arena: TypedArena<u32> = TypedArena::new(1024);
        let _ = arena[Entry {
            chunk_index: 0,
            block_index: 0,
        }];
    }
}
