//! Sort operator
//!
//! Materializes the inner plan's entire output, then orders it by a
//! prioritized column list. This breaks laziness on purpose: the first record
//! is only available after every inner record has been produced and sorted.
//! O(n log n) time and O(n) space in the inner plan's output size.
//!
//! The sort is stable, so records tied on every column keep inner order.
//! Add a unique column (the primary key) as the last column for a total order.

use super::explain::ExplainNode;
use super::ordering::{compare_records, SortSpec};
use super::plan::{QueryPlan, RecordStream};

/// Sorts records by a list of columns
pub struct Sort<'p> {
    inner: Box<dyn QueryPlan + 'p>,
    columns: Vec<SortSpec>,
}

impl<'p> Sort<'p> {
    pub fn new(inner: impl QueryPlan + 'p, columns: Vec<SortSpec>) -> Self {
        Self {
            inner: Box::new(inner),
            columns,
        }
    }

    pub fn columns(&self) -> &[SortSpec] {
        &self.columns
    }
}

impl QueryPlan for Sort<'_> {
    fn run(&self) -> RecordStream<'_> {
        let mut records = self.inner.materialize();
        records.sort_by(|a, b| compare_records(a, b, &self.columns));
        Box::new(records.into_iter())
    }

    fn name(&self) -> &'static str {
        "Sort"
    }

    fn explain(&self) -> ExplainNode {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        ExplainNode::new(self.name())
            .detail("columns", columns.join(", "))
            .child(self.inner.explain())
    }
}
