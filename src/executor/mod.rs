//! Query plan operators for planbench
//!
//! Plans are composed by the caller; nothing here chooses between them.
//!
//! # Operators
//!
//! - SeqScan: walk the table, early-stop on keys, filter records
//! - IndexScan: walk a secondary index, resolve primary keys, filter records
//! - Sort: materialize and order by columns
//! - Limit: first N records, stop pulling afterwards
//!
//! # Invariants
//!
//! - Building a plan performs no work
//! - `run()` returns an independent lazy stream on every call
//! - Operators only read; indexes are never mutated

mod explain;
mod filters;
mod index_scan;
mod limit;
mod ordering;
mod plan;
mod seq_scan;
mod sort;

pub use explain::ExplainNode;
pub use filters::{
    all_keys, all_records, key_prefix_at_least, key_prefix_at_most, key_prefix_eq, FilterOp,
    KeyFilter, Predicate, PredicateFilter, RecordFilter,
};
pub use index_scan::IndexScan;
pub use limit::Limit;
pub use ordering::{compare_records, compare_values, SortDirection, SortSpec};
pub use plan::{QueryPlan, RecordStream};
pub use seq_scan::SeqScan;
pub use sort::Sort;
