//! Arena storage with stable handles
//!
//! Buckets and trie nodes live in arenas and refer to each other by index.
//! Freed slots are recycled through a free list, so a bucket replaced by a
//! split or merge never leaves a dangling reference behind.

#[allow(clippy::module_inception)]
pub mod arena;
pub mod free_list;
pub mod handle;

// Re-exports
pub use arena::Arena;
pub use free_list::FreeList;
pub use handle::BucketHandle;
