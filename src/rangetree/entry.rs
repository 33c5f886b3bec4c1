//! Entry capability: anything that exposes a fixed-length key tuple.

use alloc::vec::Vec;

use crate::error::Error;
use crate::key::TrieKey;

/// A value indexed by an ordered tuple of per-dimension unsigned keys.
///
/// Beyond its keys the entry is opaque payload. Two entries address the same
/// slot in a `RangeTree` iff their full key tuples are equal.
///
/// # Example
/// ```rust
/// use yfast_rangetree::Entry;
///
/// struct Point {
///     x: u64,
///     y: u64,
///     label: &'static str,
/// }
///
/// impl Entry for Point {
///     fn dimensions(&self) -> usize {
///         2
///     }
///
///     fn value_at_dimension(&self, dimension: usize) -> u64 {
///         match dimension {
///             0 => self.x,
///             _ => self.y,
///         }
///     }
/// }
/// ```
pub trait Entry {
    /// Length of the key tuple.
    fn dimensions(&self) -> usize;

    /// Key in `dimension` (0-based, `< dimensions()`).
    fn value_at_dimension(&self, dimension: usize) -> u64;
}

/// Positional batch of optional entries.
///
/// Returned by `RangeTree` batch operations: one slot per input, in input
/// order, `None` where nothing was stored.
pub type Entries<E> = Vec<Option<E>>;

impl Entry for [u64] {
    #[inline]
    fn dimensions(&self) -> usize {
        self.len()
    }

    #[inline]
    fn value_at_dimension(&self, dimension: usize) -> u64 {
        self[dimension]
    }
}

impl<const N: usize> Entry for [u64; N] {
    #[inline]
    fn dimensions(&self) -> usize {
        N
    }

    #[inline]
    fn value_at_dimension(&self, dimension: usize) -> u64 {
        self[dimension]
    }
}

impl Entry for Vec<u64> {
    #[inline]
    fn dimensions(&self) -> usize {
        self.len()
    }

    #[inline]
    fn value_at_dimension(&self, dimension: usize) -> u64 {
        self[dimension]
    }
}

impl<E: Entry + ?Sized> Entry for &E {
    #[inline]
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    #[inline]
    fn value_at_dimension(&self, dimension: usize) -> u64 {
        (**self).value_at_dimension(dimension)
    }
}

/// Extract and range-check an entry's key tuple.
///
/// # Errors
/// - `DimensionMismatch` if the tuple length differs from `dimensions`
/// - `KeyOutOfRange` for the first key that does not fit in `K::BITS`
pub(crate) fn key_tuple<K: TrieKey, Q: Entry + ?Sized>(
    entry: &Q,
    dimensions: usize,
) -> Result<Vec<K>, Error> {
    let actual = entry.dimensions();
    if actual != dimensions {
        return Err(Error::DimensionMismatch {
            expected: dimensions,
            actual,
        });
    }

    (0..dimensions)
        .map(|dimension| {
            let key = entry.value_at_dimension(dimension);
            K::from_u64(key).ok_or(Error::KeyOutOfRange {
                dimension,
                key,
                bits: K::BITS,
            })
        })
        .collect()
}
