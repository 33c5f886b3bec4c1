//! Ordered iteration over a YFastTrie.
//!
//! Walks buckets through the representative linked list, so stepping from one
//! bucket to the next is O(1) after the starting bucket has been located.
//!
//! # Performance
//! - O(1) amortized per element
//! - O(log W) initial setup for range queries

use alloc::collections::btree_map;
use core::ops::{Bound, RangeBounds};

use crate::key::TrieKey;
use crate::trie::YFastTrie;

/// Iterator over entries in ascending key order, optionally bounded.
///
/// # Example
/// ```rust
/// use yfast_rangetree::YFastTrie;
///
/// let mut trie = YFastTrie::<u64, ()>::new();
/// trie.insert(30, ());
/// trie.insert(10, ());
/// trie.insert(20, ());
///
/// let keys: Vec<u64> = trie.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, vec![10, 20, 30]);
///
/// let keys: Vec<u64> = trie.range(15..=30).map(|(k, _)| k).collect();
/// assert_eq!(keys, vec![20, 30]);
/// ```
pub struct Iter<'a, K: TrieKey, V> {
    /// Trie being walked (for loading the next bucket)
    trie: &'a YFastTrie<K, V>,

    /// Representative of the bucket currently being drained
    current_leaf: Option<u32>,

    /// Entries of the current bucket within bounds
    inner: Option<btree_map::Range<'a, K, V>>,

    /// Lower bound
    start: Bound<K>,

    /// Upper bound
    end: Bound<K>,
}

impl<'a, K: TrieKey, V> Iter<'a, K, V> {
    /// Create an iterator over `(start, end)`.
    ///
    /// An empty or inverted range yields nothing.
    pub(crate) fn new(trie: &'a YFastTrie<K, V>, start: Bound<K>, end: Bound<K>) -> Self {
        let current_leaf = if is_empty_range(start, end) {
            None
        } else {
            match start {
                Bound::Included(key) | Bound::Excluded(key) => trie
                    .index()
                    .predecessor_or_equal(key)
                    .or_else(|| trie.index().first_leaf()),
                Bound::Unbounded => trie.index().first_leaf(),
            }
        };

        let inner = current_leaf.map(|leaf| trie.leaf_bucket(leaf).range((start, end)));

        Self {
            trie,
            current_leaf,
            inner,
            start,
            end,
        }
    }

    /// Check whether a bucket starting at `key` lies entirely past the end.
    #[inline]
    fn past_end(&self, key: K) -> bool {
        match self.end {
            Bound::Included(end) => key > end,
            Bound::Excluded(end) => key >= end,
            Bound::Unbounded => false,
        }
    }
}

impl<'a, K: TrieKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.inner.as_mut()?.next() {
                return Some((*key, value));
            }

            // Current bucket drained: move to the next representative
            let next = self
                .current_leaf
                .and_then(|leaf| self.trie.index().next_leaf(leaf));
            let next = match next {
                Some(next) if !self.past_end(self.trie.index().leaf(next).key) => next,
                _ => {
                    self.current_leaf = None;
                    self.inner = None;
                    return None;
                }
            };

            self.current_leaf = Some(next);
            self.inner = Some(self.trie.leaf_bucket(next).range((self.start, self.end)));
        }
    }
}

/// Check if bounds select no key, including the inverted cases that
/// `BTreeMap::range` rejects with a panic.
fn is_empty_range<K: TrieKey>(start: Bound<K>, end: Bound<K>) -> bool {
    match (start, end) {
        (Bound::Included(s), Bound::Included(e)) => s > e,
        (Bound::Included(s), Bound::Excluded(e))
        | (Bound::Excluded(s), Bound::Included(e))
        | (Bound::Excluded(s), Bound::Excluded(e)) => s >= e,
        _ => false,
    }
}

impl<K: TrieKey, V> YFastTrie<K, V> {
    /// Iterate over all entries in ascending key order.
    ///
    /// # Performance
    /// O(1) amortized per element
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self, Bound::Unbounded, Bound::Unbounded)
    }

    /// Iterate over entries whose keys fall within `range`, ascending.
    ///
    /// Inverted or empty ranges yield nothing rather than panicking.
    ///
    /// # Arguments
    /// * `range` - Range bounds (implements `RangeBounds<K>`)
    ///
    /// # Performance
    /// O(log W) setup, O(1) amortized per element
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Iter<'_, K, V> {
        Iter::new(self, range.start_bound().cloned(), range.end_bound().cloned())
    }
}

impl<'a, K: TrieKey, V> IntoIterator for &'a YFastTrie<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
