//! Free list management for slot reuse

use alloc::vec::Vec;

/// Stack of vacated arena slots.
///
/// The most recently freed slot is handed out first, which keeps the arena
/// dense after a burst of merges.
#[derive(Debug, Default, Clone)]
pub struct FreeList {
    slots: Vec<u32>,
}

impl FreeList {
    /// Create a new empty free list
    pub fn new() -> Self {
        FreeList { slots: Vec::new() }
    }

    /// Record a vacated slot.
    #[inline]
    pub fn push(&mut self, index: u32) {
        debug_assert!(!self.slots.contains(&index), "slot {index} freed twice");
        self.slots.push(index);
    }

    /// Take a slot for reuse, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<u32> {
        self.slots.pop()
    }

    /// Number of vacant slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}
