//! Sequential scan over a table
//!
//! Walks the table in primary key order (or reverse), optionally from a start
//! key. Consumes entries while `key_filter` holds and stops at the first
//! failure, then keeps the records that satisfy `filter`.
//!
//! Cost: position of the start key plus every entry examined before the
//! key filter fails. With no start key and no key filter this is O(n).

use std::sync::Arc;

use crate::index::{Direction, IndexKey, Table};
use crate::record::Record;

use super::explain::ExplainNode;
use super::filters::{all_keys, all_records, KeyFilter, Predicate, PredicateFilter, RecordFilter};
use super::plan::{QueryPlan, RecordStream};

/// Full or key-bounded scan of a table
#[derive(Clone)]
pub struct SeqScan<'t> {
    table: &'t Table,
    direction: Direction,
    start: Option<IndexKey>,
    key_filter: KeyFilter,
    filter: RecordFilter,
    key_filter_desc: Option<String>,
    filter_desc: Option<String>,
}

impl<'t> SeqScan<'t> {
    /// Forward scan of every record
    pub fn new(table: &'t Table) -> Self {
        Self {
            table,
            direction: Direction::Forward,
            start: None,
            key_filter: all_keys(),
            filter: all_records(),
            key_filter_desc: None,
            filter_desc: None,
        }
    }

    /// Sets the traversal direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Scan in descending key order
    pub fn backward(self) -> Self {
        self.direction(Direction::Backward)
    }

    /// Start at the first key `>= start` (forward) or `<= start` (backward)
    pub fn start(mut self, start: impl Into<IndexKey>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Early-stop predicate over primary keys
    pub fn key_filter<F>(mut self, key_filter: F) -> Self
    where
        F: Fn(&IndexKey) -> bool + Send + Sync + 'static,
    {
        self.key_filter = Arc::new(key_filter);
        self.key_filter_desc = Some("<fn>".to_string());
        self
    }

    /// Early-stop predicate from a shared filter, with a description for explain
    pub fn key_filter_described(mut self, key_filter: KeyFilter, desc: impl Into<String>) -> Self {
        self.key_filter = key_filter;
        self.key_filter_desc = Some(desc.into());
        self
    }

    /// Post-scan predicate over records
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.filter = Arc::new(filter);
        self.filter_desc = Some("<fn>".to_string());
        self
    }

    /// Post-scan predicates, ANDed
    pub fn predicates(mut self, predicates: Vec<Predicate>) -> Self {
        self.filter_desc = Some(PredicateFilter::describe(&predicates));
        self.filter = PredicateFilter::into_filter(predicates);
        self
    }
}

impl QueryPlan for SeqScan<'_> {
    fn run(&self) -> RecordStream<'_> {
        let key_filter = &self.key_filter;
        let filter = &self.filter;

        Box::new(
            self.table
                .scan(self.direction, self.start.as_ref())
                .take_while(move |entry| key_filter(&entry.key))
                .map(|entry| &entry.payload)
                .filter(move |record| filter(*record)),
        )
    }

    fn name(&self) -> &'static str {
        "SeqScan"
    }

    fn explain(&self) -> ExplainNode {
        ExplainNode::new(self.name())
            .detail("table", self.table.name())
            .detail("direction", self.direction.as_str())
            .detail_opt("start", self.start.as_ref())
            .detail_opt("key_filter", self.key_filter_desc.as_ref())
            .detail_opt("filter", self.filter_desc.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    fn table() -> Table {
        Table::primary(
            "items",
            (1..=6).map(|id| Record::new().with("id", id).with("buyer_id", id % 2)),
            "id",
        )
    }

    fn ids(records: Vec<&Record>) -> Vec<i64> {
        records
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .collect()
    }

    #[test]
    fn test_full_scan() {
        let table = table();
        assert_eq!(ids(SeqScan::new(&table).materialize()), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(ids(SeqScan::new(&table).backward().materialize()), vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_filter() {
        let table = table();
        let plan = SeqScan::new(&table).predicates(vec![Predicate::eq("buyer_id", 1)]);
        assert_eq!(ids(plan.materialize()), vec![1, 3, 5]);
    }

    #[test]
    fn test_start_and_key_filter() {
        let table = table();
        let stop = IndexKey::from(4);
        let plan = SeqScan::new(&table)
            .start(2)
            .key_filter(move |key| *key <= stop);
        assert_eq!(ids(plan.materialize()), vec![2, 3, 4]);

        let plan = SeqScan::new(&table).backward().start(3);
        assert_eq!(ids(plan.materialize()), vec![3, 2, 1]);
    }

    #[test]
    fn test_key_filter_stops_permanently() {
        let table = table();
        // Not monotonic: fails at 2, would pass again at 3. The scan never resumes.
        let plan = SeqScan::new(&table).key_filter(|key| *key != IndexKey::from(2));
        assert_eq!(ids(plan.materialize()), vec![1]);
    }

    #[test]
    fn test_run_twice() {
        let table = table();
        let plan = SeqScan::new(&table).filter(|r| r.get("buyer_id") == Some(&Value::Int(0)));

        let mut partial = plan.run();
        partial.next();
        assert_eq!(ids(plan.materialize()), vec![2, 4, 6]);
        assert_eq!(ids(plan.materialize()), vec![2, 4, 6]);
        assert_eq!(partial.count(), 2);
    }

    #[test]
    fn test_explain() {
        let table = table();
        let plan = SeqScan::new(&table).predicates(vec![Predicate::eq("buyer_id", 1)]);
        assert_eq!(
            plan.explain().to_string(),
            "SeqScan (table=items, direction=forward, filter=buyer_id = 1)\n"
        );
    }
}
