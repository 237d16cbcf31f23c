//! The query plan trait
//!
//! A plan is a stateless descriptor over borrowed indexes. Building one does
//! no work. `run()` returns a fresh lazy stream on every call; records are
//! produced one at a time as the consumer pulls them, and dropping the stream
//! is the only cancellation there is.

use crate::record::Record;

use super::explain::ExplainNode;

/// Lazy sequence of records borrowed from a table
pub type RecordStream<'a> = Box<dyn Iterator<Item = &'a Record> + 'a>;

/// A composable, reentrant read computation
///
/// Plans are `Send + Sync`: the indexes they borrow are immutable and their
/// predicates are shared closures, so one plan may run from several threads.
pub trait QueryPlan: Send + Sync {
    /// Starts an independent execution of this plan
    fn run(&self) -> RecordStream<'_>;

    /// Operator name
    fn name(&self) -> &'static str;

    /// Describes this plan and its inputs
    fn explain(&self) -> ExplainNode;

    /// Runs the plan to completion
    fn materialize(&self) -> Vec<&Record> {
        self.run().collect()
    }
}

impl<P: QueryPlan + ?Sized> QueryPlan for &P {
    fn run(&self) -> RecordStream<'_> {
        (**self).run()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn explain(&self) -> ExplainNode {
        (**self).explain()
    }
}

impl<P: QueryPlan + ?Sized> QueryPlan for Box<P> {
    fn run(&self) -> RecordStream<'_> {
        (**self).run()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn explain(&self) -> ExplainNode {
        (**self).explain()
    }
}
