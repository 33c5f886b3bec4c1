//! Ordered bucket: one contiguous slice of a dimension's universe.

use alloc::collections::btree_map;
use alloc::collections::BTreeMap;
use core::ops::{Bound, RangeBounds};

use crate::key::TrieKey;

/// Balanced ordered container for a run of keys.
///
/// Buckets partition a trie's keys into disjoint, order-contiguous runs of
/// Θ(W) keys each. All operations are O(log W) because a bucket never grows
/// past `bucket_max(W)` keys.
///
/// # Invariants (maintained by `YFastTrie`)
/// - Never empty while registered
/// - Every key is >= the bucket's representative (its minimum) and < the next
///   bucket's representative
#[derive(Debug, Clone)]
pub struct Bucket<K: TrieKey, V> {
    entries: BTreeMap<K, V>,
}

impl<K: TrieKey, V> Bucket<K, V> {
    /// Create an empty bucket.
    #[inline]
    pub fn new() -> Self {
        Bucket {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or overwrite `key`.
    ///
    /// # Returns
    /// The value previously stored at `key`, or `None`
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Point lookup.
    ///
    /// A miss in the bucket the representative index routed to is a definitive
    /// absence.
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.entries.get(&key)
    }

    /// Mutable point lookup.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.entries.get_mut(&key)
    }

    /// Remove `key`, returning its value.
    #[inline]
    pub fn remove(&mut self, key: K) -> Option<V> {
        self.entries.remove(&key)
    }

    /// Number of keys in the bucket.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bucket holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest key, which is the bucket's representative.
    #[inline]
    pub fn min_key(&self) -> Option<K> {
        self.entries.keys().next().copied()
    }

    /// Smallest entry.
    #[inline]
    pub fn first(&self) -> Option<(K, &V)> {
        self.entries.iter().next().map(|(k, v)| (*k, v))
    }

    /// Largest entry.
    #[inline]
    pub fn last(&self) -> Option<(K, &V)> {
        self.entries.iter().next_back().map(|(k, v)| (*k, v))
    }

    /// Largest entry with key strictly less than `key`.
    #[inline]
    pub fn predecessor(&self, key: K) -> Option<(K, &V)> {
        self.entries
            .range((Bound::Unbounded, Bound::Excluded(key)))
            .next_back()
            .map(|(k, v)| (*k, v))
    }

    /// Smallest entry with key strictly greater than `key`.
    #[inline]
    pub fn successor(&self, key: K) -> Option<(K, &V)> {
        self.entries
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|(k, v)| (*k, v))
    }

    /// Entries within `range`, ascending.
    ///
    /// # Panics
    /// Panics on an inverted range, like `BTreeMap::range`. `YFastTrie`
    /// validates bounds before calling.
    #[inline]
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> btree_map::Range<'_, K, V> {
        self.entries.range(range)
    }

    /// Split at the median.
    ///
    /// `self` keeps the lower half; the upper half is returned. Both halves are
    /// non-empty when the bucket held at least two keys, and their key ranges
    /// do not overlap.
    pub fn split(&mut self) -> Self {
        debug_assert!(self.len() >= 2, "split of a bucket with fewer than 2 keys");
        let median = self
            .entries
            .keys()
            .nth(self.len() / 2)
            .copied()
            .expect("median exists in a non-empty bucket");
        Bucket {
            entries: self.entries.split_off(&median),
        }
    }

    /// Move every entry of `other` into `self`.
    ///
    /// Used when merging neighbors; the two key ranges must not overlap.
    pub fn absorb(&mut self, mut other: Self) {
        self.entries.append(&mut other.entries);
    }
}

impl<K: TrieKey, V> Default for Bucket<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
