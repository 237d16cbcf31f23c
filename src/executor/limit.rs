//! Limit operator
//!
//! Yields at most the first N records of the inner plan and then stops
//! pulling. Over a lazy inner plan only N records are ever produced; over a
//! Sort the full materialization still happens before the first one.

use super::explain::ExplainNode;
use super::plan::{QueryPlan, RecordStream};

/// Truncates the inner plan's output
pub struct Limit<'p> {
    inner: Box<dyn QueryPlan + 'p>,
    limit: usize,
}

impl<'p> Limit<'p> {
    pub fn new(inner: impl QueryPlan + 'p, limit: usize) -> Self {
        Self {
            inner: Box::new(inner),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl QueryPlan for Limit<'_> {
    fn run(&self) -> RecordStream<'_> {
        if self.limit == 0 {
            // Never start the inner plan; a Sort would otherwise materialize
            return Box::new(std::iter::empty());
        }
        Box::new(self.inner.run().take(self.limit))
    }

    fn name(&self) -> &'static str {
        "Limit"
    }

    fn explain(&self) -> ExplainNode {
        ExplainNode::new(self.name())
            .detail("limit", self.limit)
            .child(self.inner.explain())
    }
}
