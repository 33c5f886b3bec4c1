//! Representative leaf: one per live bucket.

use crate::arena::BucketHandle;
use crate::constants::EMPTY;
use crate::key::TrieKey;

/// Leaf of the representative trie.
///
/// Stands in for one bucket during routing. The key is the bucket's minimum.
///
/// # Linked List
/// Representatives are linked in ascending key order so a located
/// representative reaches its neighbors in O(1).
/// - `next`: representative with the next higher key
/// - `prev`: representative with the next lower key
/// - `EMPTY` (u32::MAX) indicates end of list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representative<K: TrieKey> {
    /// Minimum key of the bucket.
    pub key: K,

    /// Bucket this representative routes to.
    pub bucket: BucketHandle,

    /// Next representative in ascending order, or `EMPTY`.
    pub next: u32,

    /// Previous representative in ascending order, or `EMPTY`.
    pub prev: u32,
}

impl<K: TrieKey> Representative<K> {
    /// Create an unlinked representative.
    #[inline(always)]
    pub fn new(key: K, bucket: BucketHandle) -> Self {
        Representative {
            key,
            bucket,
            next: EMPTY,
            prev: EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_representative() {
        let rep = Representative::new(0x12u8, BucketHandle::new(3));

        assert_eq!(rep.key, 0x12);
        assert_eq!(rep.bucket.index(), 3);

        // Should be unlinked
        assert_eq!(rep.next, EMPTY);
        assert_eq!(rep.prev, EMPTY);
    }
}
