//! Secondary index scan with primary key lookups
//!
//! Traverses a secondary index from an optional start key, stops at the first
//! entry failing `index_filter`, and resolves each surviving entry's primary
//! key against the table with a binary search. Resolved records are then
//! checked against `filter`.
//!
//! Cost: O(log n) to position, plus O(log n) per resolved entry. This is a
//! non-covering index scan: every match pays a point lookup into the table.

use std::sync::Arc;

use crate::index::{Direction, IndexKey, SecondaryIndex, Table};
use crate::record::Record;

use super::explain::ExplainNode;
use super::filters::{all_keys, all_records, KeyFilter, Predicate, PredicateFilter, RecordFilter};
use super::plan::{QueryPlan, RecordStream};

/// Scan of a secondary index resolved through its table
#[derive(Clone)]
pub struct IndexScan<'t> {
    table: &'t Table,
    index: &'t SecondaryIndex,
    direction: Direction,
    start: Option<IndexKey>,
    index_filter: KeyFilter,
    filter: RecordFilter,
    index_filter_desc: Option<String>,
    filter_desc: Option<String>,
}

impl<'t> IndexScan<'t> {
    /// Forward scan of the whole index
    pub fn new(table: &'t Table, index: &'t SecondaryIndex) -> Self {
        Self {
            table,
            index,
            direction: Direction::Forward,
            start: None,
            index_filter: all_keys(),
            filter: all_records(),
            index_filter_desc: None,
            filter_desc: None,
        }
    }

    /// Sets the index traversal direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Scan the index in descending key order
    pub fn backward(self) -> Self {
        self.direction(Direction::Backward)
    }

    /// Start key into the secondary index
    pub fn start(mut self, start: impl Into<IndexKey>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Early-stop predicate over secondary keys
    pub fn index_filter<F>(mut self, index_filter: F) -> Self
    where
        F: Fn(&IndexKey) -> bool + Send + Sync + 'static,
    {
        self.index_filter = Arc::new(index_filter);
        self.index_filter_desc = Some("<fn>".to_string());
        self
    }

    /// Early-stop predicate from a shared filter, with a description for explain
    pub fn index_filter_described(mut self, index_filter: KeyFilter, desc: impl Into<String>) -> Self {
        self.index_filter = index_filter;
        self.index_filter_desc = Some(desc.into());
        self
    }

    /// Predicate over resolved records
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.filter = Arc::new(filter);
        self.filter_desc = Some("<fn>".to_string());
        self
    }

    /// Predicates over resolved records, ANDed
    pub fn predicates(mut self, predicates: Vec<Predicate>) -> Self {
        self.filter_desc = Some(PredicateFilter::describe(&predicates));
        self.filter = PredicateFilter::into_filter(predicates);
        self
    }
}

impl QueryPlan for IndexScan<'_> {
    fn run(&self) -> RecordStream<'_> {
        let table = self.table;
        let index_filter = &self.index_filter;
        let filter = &self.filter;

        Box::new(
            self.index
                .scan(self.direction, self.start.as_ref())
                .take_while(move |entry| index_filter(&entry.key))
                // References with no owning record are skipped
                .filter_map(move |entry| table.get(&entry.payload))
                .filter(move |record| filter(*record)),
        )
    }

    fn name(&self) -> &'static str {
        "IndexScan"
    }

    fn explain(&self) -> ExplainNode {
        ExplainNode::new(self.name())
            .detail("table", self.table.name())
            .detail("index", self.index.name())
            .detail("direction", self.direction.as_str())
            .detail_opt("start", self.start.as_ref())
            .detail_opt("index_filter", self.index_filter_desc.as_ref())
            .detail_opt("filter", self.filter_desc.as_ref())
    }
}
