//! Arena structure for buckets, trie nodes and representatives

use alloc::vec::Vec;

use super::FreeList;

/// Generic arena with recyclable slots.
///
/// Provides contiguous storage with O(1) access by index. Indices stay valid
/// until the slot is freed; freed slots are reused by later allocations.
///
/// # Type Parameters
/// * `T` - Element type (bucket, trie node or representative)
///
/// # Memory Layout
/// - Elements stored contiguously in Vec, `None` marks a vacant slot
/// - Index-based access (u32 indices)
/// - Vacant slots tracked in a `FreeList`
///
/// # Performance
/// - Allocation: O(1) amortized
/// - Free: O(1)
/// - Access: O(1) by index
#[derive(Debug, Clone)]
pub struct Arena<T> {
    /// Storage for elements.
    ///
    /// Index in this Vec is the arena index used for references.
    elements: Vec<Option<T>>,

    /// Vacant slots available for reuse.
    free: FreeList,
}

impl<T> Arena<T> {
    /// Create a new empty arena.
    ///
    /// # Performance
    /// O(1) - creates empty Vec
    #[inline(always)]
    pub fn new() -> Self {
        Arena {
            elements: Vec::new(),
            free: FreeList::new(),
        }
    }

    /// Store an element and return its index.
    ///
    /// Reuses a vacant slot when one exists.
    ///
    /// # Performance
    /// O(1) amortized - Vec push or slot overwrite
    #[inline]
    pub fn alloc(&mut self, value: T) -> u32 {
        match self.free.pop() {
            Some(index) => {
                debug_assert!(self.elements[index as usize].is_none());
                self.elements[index as usize] = Some(value);
                index
            }
            None => {
                let index = self.elements.len() as u32;
                self.elements.push(Some(value));
                index
            }
        }
    }

    /// Remove the element at `index` and return it.
    ///
    /// # Panics
    /// Panics if the slot is out of bounds or already vacant
    #[inline]
    pub fn free(&mut self, index: u32) -> T {
        let value = self.elements[index as usize]
            .take()
            .expect("arena slot should be occupied");
        self.free.push(index);
        value
    }

    /// Get element by index.
    ///
    /// # Panics
    /// Panics if the slot is out of bounds or vacant
    ///
    /// # Performance
    /// O(1) - direct Vec indexing
    #[inline(always)]
    pub fn get(&self, index: u32) -> &T {
        self.elements[index as usize]
            .as_ref()
            .expect("arena slot should be occupied")
    }

    /// Get mutable element by index.
    ///
    /// # Panics
    /// Panics if the slot is out of bounds or vacant
    ///
    /// # Performance
    /// O(1) - direct Vec indexing
    #[inline(always)]
    pub fn get_mut(&mut self, index: u32) -> &mut T {
        self.elements[index as usize]
            .as_mut()
            .expect("arena slot should be occupied")
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len() - self.free.len()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_new() {
        let arena: Arena<u64> = Arena::new();
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_arena_alloc() {
        let mut arena = Arena::new();

        let idx0 = arena.alloc(10u64);
        assert_eq!(idx0, 0);
        assert_eq!(arena.len(), 1);

        let idx1 = arena.alloc(20u64);
        assert_eq!(idx1, 1);
        assert_eq!(arena.len(), 2);

        assert_eq!(*arena.get(idx0), 10);
        assert_eq!(*arena.get(idx1), 20);
    }

    #[test]
    fn test_arena_get_mut() {
        let mut arena = Arena::new();
        let idx = arena.alloc(1u64);

        *arena.get_mut(idx) = 42;
        assert_eq!(*arena.get(idx), 42);
    }

    #[test]
    fn test_free_and_reuse() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        let c = arena.alloc('c');

        assert_eq!(arena.free(b), 'b');
        assert_eq!(arena.len(), 2);

        // Vacant slot is reused, other indices are untouched
        let d = arena.alloc('d');
        assert_eq!(d, b);
        assert_eq!(*arena.get(a), 'a');
        assert_eq!(*arena.get(c), 'c');
        assert_eq!(*arena.get(d), 'd');
        assert_eq!(arena.len(), 3);
    }


    #[test]
    #[should_panic(expected = "arena slot should be occupied")]
    fn test_get_vacant_panics() {
        let mut arena = Arena::new();
        let idx = arena.alloc(5u8);
        arena.free(idx);
        arena.get(idx);
    }

    #[test]
    fn test_default() {
        let arena: Arena<u8> = Arena::default();
        assert_eq!(arena.len(), 0);
    }
}
