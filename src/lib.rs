//! An insertion-order-preserving hash map.
//!
//! [`OrderedMap`] is an ordered associative container: a mapping from
//! arbitrary hashable keys to values that preserves insertion order while
//! supporting point lookup, insertion, update, deletion, and ordered
//! iteration in expected O(1) amortized time per operation.
//!
//! The index is a Swiss-table-style open-addressed hash table: a 7-bit
//! fingerprint (H2) of each key's hash lives in a parallel control byte
//! array, scanned 16 slots (one "group") at a time so most probes resolve
//! with a single wide load instead of one comparison per slot. A separate,
//! index-linked insertion-order layer rides alongside the slot table so
//! iteration order survives growth, tombstone compaction, and deletion
//! without walking the slot array.
//!
//! ```
//! use swissdict::OrderedMap;
//!
//! let mut m = OrderedMap::new();
//! m.insert("a", 1).unwrap();
//! m.insert("b", 2).unwrap();
//! m.insert("b", 20).unwrap();
//! let items: Vec<_> = m.iter().map(|r| r.unwrap()).collect();
//! assert_eq!(items, vec![(&"a", &1), (&"b", &20)]);
//! ```

mod bitmask;
mod error;
mod group;
mod hash;
mod iter;
mod map;
mod probe;
mod raw;
mod slot;
mod tag;

pub use error::MapError;
pub use hash::{FoldBuildHasher, FoldHasher};
pub use iter::{Iter, Keys, Values};
pub use map::OrderedMap;
