//! Bucket handle held by the representative index

use crate::constants::EMPTY;

/// Stable reference to a bucket in the bucket arena.
///
/// The representative index stores handles, never references, so a split or
/// merge that replaces a bucket only has to re-register handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketHandle(u32);

impl BucketHandle {
    /// Wrap a bucket arena index.
    #[inline(always)]
    pub fn new(index: u32) -> Self {
        debug_assert_ne!(index, EMPTY, "EMPTY is not a valid bucket index");
        BucketHandle(index)
    }

    /// Arena index of the bucket.
    #[inline(always)]
    pub fn index(self) -> u32 {
        self.0
    }
}
