//! RangeTree: composite-key index over D dimensions.

use alloc::vec::Vec;

use crate::error::Error;
use crate::key::TrieKey;
use crate::rangetree::dimension::Dimension;
use crate::rangetree::entry::{key_tuple, Entries, Entry};

/// Multi-dimensional point index keyed by full D-tuples.
///
/// Dimension 0 is a `YFastTrie` whose values are nested levels for the
/// remaining dimensions; the last dimension stores the entries themselves.
/// Nested levels are created on first insertion below them and pruned when
/// their last entry is removed.
///
/// Every dimension shares the key width `K` (`u8`, `u16`, `u32`, `u64`), which
/// fixes the trie depth and bucket sizes at every level.
///
/// # Batches
/// `add`, `get` and `remove` take batches and return one slot per input, in
/// input order. A batch is validated as a whole before anything is touched:
/// on `Err` the tree is unchanged.
///
/// # Example
/// ```rust
/// use yfast_rangetree::RangeTree;
///
/// let mut tree = RangeTree::<[u64; 2], u8>::new(2).unwrap();
/// assert_eq!(tree.add([[2u64, 3], [3, 4]]).unwrap(), vec![None, None]);
///
/// let found = tree.get(&[[2u64, 3], [2, 4]]).unwrap();
/// assert_eq!(found, vec![Some(&[2u64, 3]), None]);
///
/// let inside = tree.query(&[0, 0], &[2, 9]).unwrap();
/// assert_eq!(inside, vec![&[2u64, 3]]);
/// ```
#[derive(Debug, Clone)]
pub struct RangeTree<E, K: TrieKey> {
    /// Key tuple length, fixed at construction
    dimensions: usize,

    /// Level over dimension 0
    root: Dimension<E, K>,

    /// Number of stored entries
    len: usize,
}

impl<E: Entry, K: TrieKey> RangeTree<E, K> {
    /// Create an empty tree over `dimensions` dimensions of width `K::BITS`.
    ///
    /// # Errors
    /// `ZeroDimensions` if `dimensions == 0`
    pub fn new(dimensions: usize) -> Result<Self, Error> {
        if dimensions == 0 {
            return Err(Error::ZeroDimensions);
        }

        Ok(Self {
            dimensions,
            root: Dimension::new(dimensions),
            len: 0,
        })
    }

    /// Key tuple length every entry must have.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree stores no entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert or overwrite each entry at its key tuple.
    ///
    /// Entries are applied in order, so a later entry in the batch overwrites
    /// an earlier one with the same tuple and gets it back in its slot.
    ///
    /// # Returns
    /// Per input, the entry previously stored at the same tuple, or `None`
    ///
    /// # Errors
    /// - `DimensionMismatch` if any entry's tuple length is not `dimensions()`
    /// - `KeyOutOfRange` if any key does not fit in `K::BITS`
    ///
    /// # Performance
    /// O(D log W) amortized per entry
    pub fn add<I: IntoIterator<Item = E>>(&mut self, entries: I) -> Result<Entries<E>, Error> {
        let batch = entries
            .into_iter()
            .map(|entry| key_tuple::<K, E>(&entry, self.dimensions).map(|keys| (keys, entry)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut previous = Vec::with_capacity(batch.len());
        for (keys, entry) in batch {
            let old = self.root.insert(&keys, entry);
            if old.is_none() {
                self.len += 1;
            }
            previous.push(old);
        }

        Ok(previous)
    }

    /// Look up each query's key tuple.
    ///
    /// Queries are used only for their keys; never creates levels.
    ///
    /// # Returns
    /// Per query, the stored entry or `None`
    ///
    /// # Errors
    /// Same validation as `add`
    ///
    /// # Performance
    /// O(D log W) per query
    pub fn get<Q: Entry>(&self, queries: &[Q]) -> Result<Entries<&E>, Error> {
        let tuples = self.key_tuples(queries)?;
        Ok(tuples.iter().map(|keys| self.root.get(keys)).collect())
    }

    /// Remove the entry at each query's key tuple.
    ///
    /// # Returns
    /// Per query, the removed entry or `None`
    ///
    /// # Errors
    /// Same validation as `add`
    pub fn remove<Q: Entry>(&mut self, queries: &[Q]) -> Result<Entries<E>, Error> {
        let tuples = self.key_tuples(queries)?;

        let mut removed = Vec::with_capacity(tuples.len());
        for keys in &tuples {
            let old = self.root.remove(keys);
            if old.is_some() {
                self.len -= 1;
            }
            removed.push(old);
        }

        Ok(removed)
    }

    /// Collect every entry inside the inclusive box `[low, high]`.
    ///
    /// Results come in lexicographic key-tuple order. A box inverted in any
    /// dimension selects nothing.
    ///
    /// # Errors
    /// Both corners are validated like entry keys.
    ///
    /// # Performance
    /// O(D log W) per visited branch plus O(1) amortized per result
    pub fn query(&self, low: &[u64], high: &[u64]) -> Result<Vec<&E>, Error> {
        let low = key_tuple::<K, _>(low, self.dimensions)?;
        let high = key_tuple::<K, _>(high, self.dimensions)?;

        let mut out = Vec::new();
        self.root.query(&low, &high, &mut out);
        Ok(out)
    }

    /// Validate a batch of queries as a whole.
    fn key_tuples<Q: Entry>(&self, queries: &[Q]) -> Result<Vec<Vec<K>>, Error> {
        queries
            .iter()
            .map(|query| key_tuple(query, self.dimensions))
            .collect()
    }

    /// Panic if any level is malformed or the cached length is stale.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        self.root.check_invariants(self.dimensions);
        assert_eq!(self.root.count(), self.len, "cached length is stale");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rangetree::entry::mock::MockEntry;

    fn e(keys: &[u64]) -> MockEntry {
        MockEntry::new(keys)
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            RangeTree::<MockEntry, u8>::new(0).unwrap_err(),
            Error::ZeroDimensions
        );

        let tree = RangeTree::<MockEntry, u8>::new(3).unwrap();
        assert_eq!(tree.dimensions(), 3);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_single_dimension_add_get() {
        let mut tree = RangeTree::<MockEntry, u8>::new(1).unwrap();
        let e1 = e(&[2]);
        let e2 = e(&[5]);

        let overwritten = tree.add([e1.clone(), e2.clone()]).unwrap();
        assert_eq!(overwritten, vec![None, None]);
        assert_eq!(tree.len(), 2);

        let found = tree.get(&[e(&[18]), e(&[19])]).unwrap();
        assert_eq!(found, vec![None, None]);

        let found = tree.get(&[e(&[2]), e(&[3])]).unwrap();
        assert_eq!(found, vec![Some(&e1), None]);

        let found = tree.get(&[e(&[5])]).unwrap();
        assert_eq!(found, vec![Some(&e2)]);
        tree.check_invariants();
    }

    #[test]
    fn test_single_dimension_overwrite() {
        let mut tree = RangeTree::<MockEntry, u8>::new(1).unwrap();
        let e1 = MockEntry::tagged(1, &[2]);
        let e2 = MockEntry::tagged(2, &[2]);

        assert_eq!(tree.add([e1.clone()]).unwrap(), vec![None]);
        assert_eq!(tree.add([e2.clone()]).unwrap(), vec![Some(e1)]);
        assert_eq!(tree.get(&[e(&[2])]).unwrap(), vec![Some(&e2)]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_multi_dimension_add_get() {
        let mut tree = RangeTree::<MockEntry, u8>::new(2).unwrap();
        let e1 = e(&[2, 3]);
        let e2 = e(&[3, 4]);

        let overwritten = tree.add([e1.clone(), e2.clone()]).unwrap();
        assert_eq!(overwritten, vec![None, None]);

        // Mixes dimension 0 of e1 with dimension 1 of e2
        assert_eq!(tree.get(&[e(&[2, 4])]).unwrap(), vec![None]);

        let found = tree.get(&[e(&[2, 3]), e(&[2, 1])]).unwrap();
        assert_eq!(found, vec![Some(&e1), None]);

        let found = tree.get(&[e(&[3, 4]), e(&[3, 5])]).unwrap();
        assert_eq!(found, vec![Some(&e2), None]);
        tree.check_invariants();
    }

    #[test]
    fn test_multi_dimension_overwrite() {
        let mut tree = RangeTree::<MockEntry, u8>::new(2).unwrap();
        let e1 = MockEntry::tagged(1, &[2, 3]);
        let e2 = MockEntry::tagged(2, &[2, 3]);

        assert_eq!(tree.add([e1.clone()]).unwrap(), vec![None]);
        assert_eq!(tree.add([e2.clone()]).unwrap(), vec![Some(e1)]);
        assert_eq!(tree.get(&[e(&[2, 3])]).unwrap(), vec![Some(&e2)]);
        assert_eq!(tree.len(), 1);
        tree.check_invariants();
    }

    #[test]
    fn test_repeated_add_returns_previous() {
        let mut tree = RangeTree::<MockEntry, u8>::new(2).unwrap();
        let entry = e(&[7, 7]);

        assert_eq!(tree.add([entry.clone()]).unwrap(), vec![None]);
        assert_eq!(tree.add([entry.clone()]).unwrap(), vec![Some(entry.clone())]);
        assert_eq!(tree.add([entry.clone()]).unwrap(), vec![Some(entry)]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_batch_overwrites_within_itself() {
        let mut tree = RangeTree::<MockEntry, u8>::new(1).unwrap();
        let first = MockEntry::tagged(1, &[4]);
        let second = MockEntry::tagged(2, &[4]);

        let overwritten = tree.add([first.clone(), e(&[9]), second]).unwrap();
        assert_eq!(overwritten, vec![None, None, Some(first)]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_dimension_mismatch_leaves_tree_untouched() {
        let mut tree = RangeTree::<MockEntry, u8>::new(2).unwrap();
        tree.add([e(&[1, 1])]).unwrap();

        let err = tree.add([e(&[2, 2]), e(&[3])]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(tree.get(&[e(&[2, 2])]).unwrap(), vec![None]);
        assert_eq!(tree.len(), 1);

        assert!(tree.get(&[e(&[1, 1, 1])]).is_err());
        assert!(tree.remove(&[e(&[1, 1]), e(&[1])]).is_err());
        assert_eq!(tree.len(), 1);
        tree.check_invariants();
    }

    #[test]
    fn test_key_out_of_range() {
        let mut tree = RangeTree::<MockEntry, u8>::new(2).unwrap();
        let err = tree.add([e(&[1, 256])]).unwrap_err();
        assert_eq!(
            err,
            Error::KeyOutOfRange {
                dimension: 1,
                key: 256,
                bits: 8
            }
        );
        assert!(tree.is_empty());

        let mut wide = RangeTree::<MockEntry, u64>::new(2).unwrap();
        let entry = e(&[u64::MAX, 0]);
        wide.add([entry.clone()]).unwrap();
        assert_eq!(wide.get(&[e(&[u64::MAX, 0])]).unwrap(), vec![Some(&entry)]);
    }

    #[test]
    fn test_remove_prunes_and_returns() {
        let mut tree = RangeTree::<MockEntry, u16>::new(3).unwrap();
        let a = e(&[1, 2, 3]);
        let b = e(&[1, 2, 4]);
        tree.add([a.clone(), b.clone()]).unwrap();

        let removed = tree.remove(&[e(&[1, 2, 3]), e(&[1, 2, 3]), e(&[9, 9, 9])]).unwrap();
        assert_eq!(removed, vec![Some(a), None, None]);
        assert_eq!(tree.len(), 1);
        tree.check_invariants();

        assert_eq!(tree.remove(&[e(&[1, 2, 4])]).unwrap(), vec![Some(b)]);
        assert!(tree.is_empty());
        tree.check_invariants();
    }

    #[test]
    fn test_query_box() {
        let mut tree = RangeTree::<MockEntry, u8>::new(2).unwrap();
        for x in 0..20u64 {
            for y in 0..20u64 {
                tree.add([e(&[x, y])]).unwrap();
            }
        }
        tree.check_invariants();

        let found: Vec<Vec<u64>> = tree
            .query(&[3, 17], &[5, 18])
            .unwrap()
            .into_iter()
            .map(|entry| entry.keys.clone())
            .collect();
        assert_eq!(
            found,
            vec![
                vec![3, 17],
                vec![3, 18],
                vec![4, 17],
                vec![4, 18],
                vec![5, 17],
                vec![5, 18]
            ]
        );

        // Inverted in one dimension
        assert!(tree.query(&[5, 18], &[6, 17]).unwrap().is_empty());
        assert!(tree.query(&[0], &[1]).is_err());
    }

    #[test]
    fn test_many_entries_split_buckets() {
        let mut tree = RangeTree::<MockEntry, u8>::new(1).unwrap();
        let entries: Vec<MockEntry> = (0..=255u64).rev().map(|k| e(&[k])).collect();
        let overwritten = tree.add(entries.clone()).unwrap();
        assert!(overwritten.iter().all(Option::is_none));
        tree.check_invariants();

        let found = tree.get(&entries).unwrap();
        for (slot, entry) in found.iter().zip(&entries) {
            assert_eq!(*slot, Some(entry));
        }
    }
}
