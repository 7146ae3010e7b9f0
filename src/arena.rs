//! Chunked, single-type node storage addressed by copyable handles.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in a `TypedArena<T>`.
///
/// Handles are plain indices: they stay valid until the object is freed, after which the slot may
/// be handed out again by a later allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Entry {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Entry>),
}

/// An allocator for a single type of object, used as the node store of the linked containers in
/// this crate.
///
/// Objects live in fixed-size chunks that are never reallocated, so growing the arena does not
/// move existing objects. Freed slots are threaded onto a free list and reused before a new chunk
/// is requested. Links between objects are expressed as `Entry` handles instead of pointers, which
/// lets a structure with back-references (parents, previous nodes) be written without unsafe code.
///
/// # Examples
///
/// ```
/// use dsl_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(16);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    head: Option<Entry>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    size: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_entry(&self, entry: &Entry) -> bool {
        entry.chunk_index < self.chunks.len()
            && entry.block_index < self.chunks[entry.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` holding `chunk_size` objects per chunk. No memory
    /// is requested until the first allocation.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            size: 0,
            capacity: 0,
        }
    }

    fn push_chunk(&mut self, chunk: Vec<Block<T>>) {
        self.chunks.push(chunk);
        self.capacity += self.chunk_size;
        debug!(
            "arena grew to {} chunks ({} slots)",
            self.chunks.len(),
            self.capacity,
        );
    }

    fn try_grow(&mut self) -> Result<()> {
        let mut chunk = Vec::new();
        let reserved = self
            .chunks
            .try_reserve(1)
            .and_then(|_| chunk.try_reserve_exact(self.chunk_size));
        if let Err(source) = reserved {
            warn!("arena failed to reserve a chunk of {} slots", self.chunk_size);
            return Err(Error::AllocationFailure {
                requested: self.chunk_size,
                source,
            });
        }
        self.push_chunk(chunk);
        Ok(())
    }

    // precondition: there is at least one free slot
    fn place(&mut self, value: T) -> Entry {
        self.size += 1;
        match self.head.take() {
            None => {
                let chunk_index = self.chunks.len() - 1;
                let last_chunk = &mut self.chunks[chunk_index];
                last_chunk.push(Block::Occupied(value));
                Entry {
                    chunk_index,
                    block_index: last_chunk.len() - 1,
                }
            },
            Some(entry) => {
                let block = &mut self.chunks[entry.chunk_index][entry.block_index];
                match mem::replace(block, Block::Occupied(value)) {
                    Block::Vacant(next_entry) => {
                        self.head = next_entry;
                        entry
                    },
                    Block::Occupied(_) => panic!("Expected a vacant block on the free list."),
                }
            },
        }
    }

    /// Allocates an object in the arena and returns its `Entry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Entry {
        if self.size == self.capacity {
            let chunk = Vec::with_capacity(self.chunk_size);
            self.push_chunk(chunk);
        }
        self.place(value)
    }

    /// Allocates an object in the arena, reporting a failure to obtain a new chunk as an error
    /// instead of aborting.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.try_allocate(7).unwrap();
    /// assert_eq!(arena[x], 7);
    /// ```
    pub fn try_allocate(&mut self, value: T) -> Result<Entry> {
        if self.size == self.capacity {
            self.try_grow()?;
        }
        Ok(self.place(value))
    }

    /// Deallocates an object in the arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if entry corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, entry: &Entry) -> T {
        if !self.is_valid_entry(entry) {
            panic!("Error: attempting to free invalid block.");
        }
        let block = &mut self.chunks[entry.chunk_index][entry.block_index];
        if let Block::Vacant(_) = block {
            panic!("Error: attempting to free vacant block.");
        }
        match mem::replace(block, Block::Vacant(self.head.take())) {
            Block::Occupied(value) => {
                self.size -= 1;
                self.head = Some(*entry);
                value
            },
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the entry does not
    /// correspond to a live object.
    pub fn get(&self, entry: &Entry) -> Option<&T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        match self.chunks[entry.chunk_index][entry.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the entry does not
    /// correspond to a live object.
    pub fn get_mut(&mut self, entry: &Entry) -> Option<&mut T> {
        if !self.is_valid_entry(entry) {
            return None;
        }
        match self.chunks[entry.chunk_index][entry.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops every object in the arena and releases all chunks. Every previously returned
    /// `Entry` becomes invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(4);
    /// let x = arena.allocate(1);
    /// arena.clear();
    /// assert_eq!(arena.get(&x), None);
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.size = 0;
        self.capacity = 0;
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
    use super::{Entry, TypedArena};
    use crate::error::Error;

    fn entry(chunk_index: usize, block_index: usize) -> Entry {
        Entry {
            chunk_index,
            block_index,
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_chunk_size() {
        let _: TypedArena<u32> = TypedArena::new(0);
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(8);
        arena.free(&entry(0, 0));
    }

    #[test]
    #[should_panic]
    fn test_free_twice() {
        let mut arena = TypedArena::new(8);
        let x = arena.allocate(0);
        arena.free(&x);
        arena.free(&x);
    }

    #[test]
    fn test_allocate_fills_chunks_in_order() {
        let mut arena = TypedArena::new(2);
        assert_eq!(arena.allocate('a'), entry(0, 0));
        assert_eq!(arena.allocate('b'), entry(0, 1));
        assert_eq!(arena.try_allocate('c').unwrap(), entry(1, 0));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_try_allocate_reports_failure() {
        let chunk_size = usize::max_value() / 4;
        let mut arena = TypedArena::<u64>::new(chunk_size);
        for _ in 0..2 {
            match arena.try_allocate(1) {
                Err(Error::AllocationFailure { requested, .. }) => {
                    assert_eq!(requested, chunk_size)
                },
                Ok(_) => panic!("Expected allocation of an oversized chunk to fail."),
            }
            assert_eq!(arena.len(), 0);
            assert!(arena.chunks.is_empty());
            assert_eq!(arena.capacity, 0);
        }
        assert!(arena.is_empty());
        assert_eq!(arena.get(&entry(0, 0)), None);
    }

    #[test]
    fn test_free_list_reuse() {
        let mut arena = TypedArena::new(4);
        let x = arena.allocate(10);
        let y = arena.allocate(20);
        assert_eq!(arena.free(&x), 10);
        assert_eq!(arena.free(&y), 20);

        // most recently freed slot is reused first
        assert_eq!(arena.allocate(30), y);
        assert_eq!(arena.allocate(40), x);
        assert_eq!(arena.allocate(50), entry(0, 2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_get_vacant_and_invalid() {
        let mut arena = TypedArena::new(4);
        let x = arena.allocate(1);
        arena.allocate(2);
        arena.free(&x);
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.get(&entry(3, 0)), None);
        assert_eq!(arena.get_mut(&entry(0, 3)), None);
    }

    #[test]
    fn test_index_mut() {
        let mut arena = TypedArena::new(4);
        let x = arena.allocate(vec![1]);
        arena[x].push(2);
        assert_eq!(arena[x], vec![1, 2]);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(1);
        let x = arena.allocate(1);
        arena.allocate(2);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.allocate(3), entry(0, 0));
    }
}
