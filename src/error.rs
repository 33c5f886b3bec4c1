//! Errors reported by the range tree's batched operations.

/// Caller contract violations detected before any mutation happens.
///
/// Structural invariant breaks are bugs and are not represented here; they are
/// caught by `check_invariants` in tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An entry's key tuple length differs from the tree's dimension count.
    #[error("entry has {actual} dimensions, tree is configured for {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A key does not fit in the configured universe width.
    #[error("key {key} in dimension {dimension} does not fit in {bits} bits")]
    KeyOutOfRange { dimension: usize, key: u64, bits: u32 },

    /// A tree was requested with zero dimensions.
    #[error("a range tree needs at least one dimension")]
    ZeroDimensions,
}
