//! Y-fast trie: ordered key/value map over one dimension's universe.

use crate::arena::{Arena, BucketHandle};
use crate::constants::{bucket_max, bucket_min};
use crate::key::TrieKey;
use crate::trie::{Bucket, RepresentativeIndex};

/// Ordered map over a bounded-width unsigned universe.
///
/// Keys are partitioned into buckets of Θ(W) keys (balanced ordered
/// containers); an x-fast trie over the bucket minimums routes every
/// operation to the right bucket in O(log W).
///
/// # Architecture
/// - `buckets`: arena of `Bucket`s addressed by `BucketHandle`
/// - `index`: `RepresentativeIndex` with one representative per bucket
///   (the bucket's minimum key)
///
/// # Invariants
/// - Buckets partition the stored keys into disjoint, order-contiguous runs
/// - Each bucket holds at most `2W` keys, and at least `W/2` while there is
///   more than one bucket
/// - The registered representatives are exactly the bucket minimums
///
/// # Performance
/// - get / contains_key: O(log W)
/// - insert / remove: O(log W) amortized, plus O(W) when a split, merge or
///   representative change touches the trie
/// - predecessor / successor: O(log W)
///
/// # Example
/// ```rust
/// use yfast_rangetree::YFastTrie;
///
/// let mut trie = YFastTrie::<u8, &str>::new();
/// assert_eq!(trie.insert(10, "ten"), None);
/// assert_eq!(trie.insert(10, "TEN"), Some("ten"));
/// assert_eq!(trie.get(10), Some(&"TEN"));
/// assert_eq!(trie.successor(5), Some((10, &"TEN")));
/// ```
#[derive(Debug, Clone)]
pub struct YFastTrie<K: TrieKey, V> {
    /// Bucket storage
    buckets: Arena<Bucket<K, V>>,

    /// Routing structure over bucket representatives
    index: RepresentativeIndex<K>,

    /// Number of keys stored in the trie
    len: usize,
}

impl<K: TrieKey, V> YFastTrie<K, V> {
    /// Create a new empty trie.
    ///
    /// # Example
    /// ```rust
    /// use yfast_rangetree::YFastTrie;
    ///
    /// let trie = YFastTrie::<u64, ()>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            buckets: Arena::new(),
            index: RepresentativeIndex::new(),
            len: 0,
        }
    }

    /// Get the number of keys in the trie.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the trie is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live buckets.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.index.len()
    }

    /// Insert or overwrite `key`.
    ///
    /// Routes to the bucket covering `key` (creating the first bucket in an
    /// empty trie, or widening the first bucket downward for a key below every
    /// representative), inserts, and splits the bucket if it overflowed.
    ///
    /// # Returns
    /// The value previously stored at `key`, or `None` for a fresh key
    ///
    /// # Example
    /// ```rust
    /// use yfast_rangetree::YFastTrie;
    ///
    /// let mut trie = YFastTrie::<u32, char>::new();
    /// assert_eq!(trie.insert(42, 'a'), None);
    /// assert_eq!(trie.insert(42, 'b'), Some('a'));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let handle = self.bucket_for_insert(key);

        let bucket = self.buckets.get_mut(handle.index());
        let previous = bucket.insert(key, value);

        if previous.is_none() {
            self.len += 1;
            if bucket.len() > bucket_max(K::BITS) {
                self.split(handle);
            }
        }

        previous
    }

    /// Look up `key`.
    ///
    /// Keys below every representative are rejected without touching a
    /// bucket.
    ///
    /// # Example
    /// ```rust
    /// use yfast_rangetree::YFastTrie;
    ///
    /// let mut trie = YFastTrie::<u8, u8>::new();
    /// trie.insert(2, 20);
    /// assert_eq!(trie.get(2), Some(&20));
    /// assert_eq!(trie.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        let handle = self.index.find_bucket_for(key)?;
        self.buckets.get(handle.index()).get(key)
    }

    /// Mutable lookup of `key`.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let handle = self.index.find_bucket_for(key)?;
        self.buckets.get_mut(handle.index()).get_mut(key)
    }

    /// Check if `key` is stored.
    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Get the value at `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, default: F) -> &mut V {
        if !self.contains_key(key) {
            self.insert(key, default());
        }
        self.get_mut(key).expect("key was just inserted")
    }

    /// Remove `key`.
    ///
    /// An emptied bucket is dropped; a bucket that loses its minimum moves its
    /// representative; a bucket that falls below `W/2` keys is merged with a
    /// neighbor (and re-split if the merge overflows).
    ///
    /// # Returns
    /// The removed value, or `None` if `key` was absent
    ///
    /// # Example
    /// ```rust
    /// use yfast_rangetree::YFastTrie;
    ///
    /// let mut trie = YFastTrie::<u16, i32>::new();
    /// trie.insert(7, -7);
    /// assert_eq!(trie.remove(7), Some(-7));
    /// assert_eq!(trie.remove(7), None);
    /// ```
    pub fn remove(&mut self, key: K) -> Option<V> {
        let handle = self.index.find_bucket_for(key)?;
        let bucket = self.buckets.get_mut(handle.index());
        let representative = bucket.min_key()?;
        let value = bucket.remove(key)?;
        self.len -= 1;

        let new_min = bucket.min_key();
        let remaining = bucket.len();

        match new_min {
            None => {
                self.index.unregister(representative);
                self.buckets.free(handle.index());
                log::trace!("dropped empty bucket at {representative:?}");
            }
            Some(new_min) => {
                if new_min != representative {
                    self.index.rekey(representative, new_min);
                }
                if remaining < bucket_min(K::BITS) && self.index.len() > 1 {
                    self.merge(handle);
                }
            }
        }

        Some(value)
    }

    /// Smallest entry.
    pub fn min(&self) -> Option<(K, &V)> {
        let leaf = self.index.first_leaf()?;
        self.bucket_of(leaf).first()
    }

    /// Largest entry.
    pub fn max(&self) -> Option<(K, &V)> {
        let leaf = self.index.last_leaf()?;
        self.bucket_of(leaf).last()
    }

    /// Largest entry with key strictly less than `key`.
    ///
    /// # Algorithm
    /// 1. Route to the bucket covering `key` (none: every key is larger)
    /// 2. Search that bucket
    /// 3. If `key` is at or below the bucket's minimum, the answer is the
    ///    previous bucket's maximum
    ///
    /// # Example
    /// ```rust
    /// use yfast_rangetree::YFastTrie;
    ///
    /// let mut trie = YFastTrie::<u32, ()>::new();
    /// trie.insert(10, ());
    /// trie.insert(20, ());
    ///
    /// assert_eq!(trie.predecessor(20).map(|(k, _)| k), Some(10));
    /// assert_eq!(trie.predecessor(15).map(|(k, _)| k), Some(10));
    /// assert_eq!(trie.predecessor(10), None);
    /// ```
    pub fn predecessor(&self, key: K) -> Option<(K, &V)> {
        let leaf = self.index.predecessor_or_equal(key)?;
        if let Some(found) = self.bucket_of(leaf).predecessor(key) {
            return Some(found);
        }
        let prev = self.index.prev_leaf(leaf)?;
        self.bucket_of(prev).last()
    }

    /// Smallest entry with key strictly greater than `key`.
    ///
    /// # Example
    /// ```rust
    /// use yfast_rangetree::YFastTrie;
    ///
    /// let mut trie = YFastTrie::<u32, ()>::new();
    /// trie.insert(10, ());
    /// trie.insert(20, ());
    ///
    /// assert_eq!(trie.successor(10).map(|(k, _)| k), Some(20));
    /// assert_eq!(trie.successor(0).map(|(k, _)| k), Some(10));
    /// assert_eq!(trie.successor(20), None);
    /// ```
    pub fn successor(&self, key: K) -> Option<(K, &V)> {
        let leaf = match self.index.predecessor_or_equal(key) {
            Some(leaf) => leaf,
            None => return self.min(),
        };
        if let Some(found) = self.bucket_of(leaf).successor(key) {
            return Some(found);
        }
        let next = self.index.next_leaf(leaf)?;
        self.bucket_of(next).first()
    }

    /// Choose the bucket a new `key` belongs in, creating or re-keying one if
    /// needed.
    fn bucket_for_insert(&mut self, key: K) -> BucketHandle {
        if let Some(handle) = self.index.find_bucket_for(key) {
            return handle;
        }

        match self.index.first_leaf() {
            Some(first) => {
                // Below every representative: the first bucket widens downward
                // and `key` becomes its minimum.
                let (representative, handle) = {
                    let leaf = self.index.leaf(first);
                    (leaf.key, leaf.bucket)
                };
                self.index.rekey(representative, key);
                handle
            }
            None => {
                let handle = BucketHandle::new(self.buckets.alloc(Bucket::new()));
                self.index.register(key, handle);
                handle
            }
        }
    }

    /// Split an overfull bucket at its median and register the upper half.
    fn split(&mut self, handle: BucketHandle) {
        let upper = self.buckets.get_mut(handle.index()).split();
        let upper_min = upper
            .min_key()
            .expect("upper half of a split is non-empty");
        debug_assert!(upper.len() >= bucket_min(K::BITS));
        debug_assert!(self.buckets.get(handle.index()).len() >= bucket_min(K::BITS));

        let upper_handle = BucketHandle::new(self.buckets.alloc(upper));
        self.index.register(upper_min, upper_handle);
        log::trace!("split bucket at {upper_min:?}");
    }

    /// Merge an underfull bucket with a neighbor.
    ///
    /// The right bucket of the pair is absorbed into the left one; its
    /// representative is unregistered. An overflowing result is split again.
    fn merge(&mut self, handle: BucketHandle) {
        let representative = self
            .buckets
            .get(handle.index())
            .min_key()
            .expect("merged bucket is non-empty");
        let leaf = self
            .index
            .leaf_for_key(representative)
            .expect("bucket minimum is registered");

        let (left, right_key) = match self.index.next_leaf(leaf) {
            Some(next) => (handle, self.index.leaf(next).key),
            None => {
                let prev = self
                    .index
                    .prev_leaf(leaf)
                    .expect("merge requires a neighbor");
                (self.index.leaf(prev).bucket, representative)
            }
        };

        let right = self
            .index
            .unregister(right_key)
            .expect("right representative is registered");
        let right = self.buckets.free(right.index());

        let merged = self.buckets.get_mut(left.index());
        merged.absorb(right);
        let merged_len = merged.len();
        log::trace!("merged bucket at {right_key:?} into its left neighbor");

        if merged_len > bucket_max(K::BITS) {
            self.split(left);
        }
    }

    #[inline(always)]
    fn bucket_of(&self, leaf_idx: u32) -> &Bucket<K, V> {
        self.buckets.get(self.index.leaf(leaf_idx).bucket.index())
    }

    /// Bucket behind a representative, for iteration.
    #[inline(always)]
    pub(crate) fn leaf_bucket(&self, leaf_idx: u32) -> &Bucket<K, V> {
        self.bucket_of(leaf_idx)
    }

    /// Representative index, for iteration.
    #[inline(always)]
    pub(crate) fn index(&self) -> &RepresentativeIndex<K> {
        &self.index
    }

    /// Panic if any structural invariant is broken.
    ///
    /// Intended for tests: O(n) walk over every bucket.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        self.index.check_invariants();
        assert_eq!(
            self.index.len(),
            self.buckets.len(),
            "representatives and buckets out of sync"
        );

        let mut total = 0usize;
        let mut cursor = self.index.first_leaf();
        let mut previous_max: Option<K> = None;
        while let Some(leaf_idx) = cursor {
            let leaf = self.index.leaf(leaf_idx);
            let bucket = self.buckets.get(leaf.bucket.index());

            assert!(!bucket.is_empty(), "registered bucket is empty");
            assert_eq!(
                bucket.min_key(),
                Some(leaf.key),
                "representative is not the bucket minimum"
            );
            assert!(bucket.len() <= bucket_max(K::BITS), "bucket overflow");
            if self.index.len() > 1 {
                assert!(bucket.len() >= bucket_min(K::BITS), "bucket underflow");
            }
            if let Some(previous_max) = previous_max {
                assert!(previous_max < leaf.key, "bucket ranges overlap");
            }

            previous_max = bucket.last().map(|(k, _)| k);
            total += bucket.len();
            cursor = self.index.next_leaf(leaf_idx);
        }

        assert_eq!(total, self.len, "cached length is stale");
    }
}

impl<K: TrieKey, V> Default for YFastTrie<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
