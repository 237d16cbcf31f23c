//! Ordered indexes for planbench
//!
//! Indexes are immutable, key-sorted vectors built once from records.
//!
//! # Design Principles
//!
//! - Built once: bulk load sorts, nothing is inserted afterwards
//! - Binary search positioning: `iter`/`rev` locate their start in O(log n)
//! - Borrowed traversal: scans walk a slice of the storage, no copies
//!
//! # Invariants
//!
//! - Entries are sorted ascending by key after construction
//! - Secondary payloads are primary keys, never records
//! - Traversals are independent; consuming one never affects another

mod build;
mod key;
mod ordered;

pub use build::{SecondaryIndex, Table};
pub use key::IndexKey;
pub use ordered::{Direction, IndexEntry, OrderedIndex, Traversal};
