//! # yfast-rangetree
//!
//! Multi-dimensional point index built from y-fast tries, one per dimension.
//!
//! Every dimension's keys are unsigned integers of a fixed width `W`
//! (`u8`/`u16`/`u32`/`u64`, chosen by type). A `YFastTrie` partitions one
//! dimension's keys into buckets of Θ(W) keys and routes lookups through an
//! x-fast trie over the bucket minimums. A `RangeTree` nests tries dimension
//! by dimension to index full key tuples.
//!
//! ## Features
//! - O(log W) exact lookup, predecessor and successor per dimension
//! - Batched insert-with-overwrite, lookup and removal over D-tuples
//! - Ordered range iteration and inclusive box queries
//! - no_std compatible (requires alloc)
//!
//! ## Example
//! ```rust
//! use yfast_rangetree::{Entry, RangeTree};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: u64,
//!     y: u64,
//!     name: &'static str,
//! }
//!
//! impl Entry for Point {
//!     fn dimensions(&self) -> usize {
//!         2
//!     }
//!
//!     fn value_at_dimension(&self, dimension: usize) -> u64 {
//!         if dimension == 0 { self.x } else { self.y }
//!     }
//! }
//!
//! let mut tree = RangeTree::<Point, u16>::new(2).unwrap();
//! tree.add([
//!     Point { x: 2, y: 3, name: "a" },
//!     Point { x: 3, y: 4, name: "b" },
//! ])
//! .unwrap();
//!
//! let found = tree.get(&[[2u64, 3], [2, 4]]).unwrap();
//! assert_eq!(found[0].map(|p| p.name), Some("a"));
//! assert!(found[1].is_none());
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod arena;
mod constants;
mod error;
mod key;
mod rangetree;
mod trie;

#[cfg(test)]
mod proptests;

pub use error::Error;
pub use key::TrieKey;
pub use rangetree::{Entries, Entry, RangeTree};
pub use trie::{Iter, YFastTrie};
