//! Observability events for planbench
//!
//! Every structured log line names one of these events. Events are explicit
//! and typed so log consumers can rely on a closed set of names.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Dataset
    /// Synthetic dataset written
    DatasetGenerated,
    /// One table file read
    TableLoaded,
    /// All tables read
    DatasetLoaded,

    // Indexes
    /// One table or secondary index built
    IndexBuilt,
    /// All indexes built
    CatalogReady,

    // Bench
    /// A named operation was timed
    OperationTimed,
    /// Two plans produced the same sequence
    PlansAgree,
    /// Two plans produced different sequences
    PlanMismatch,

    // Query
    /// One-shot query executed
    QueryExecuted,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::DatasetGenerated => "DATASET_GENERATED",
            Event::TableLoaded => "TABLE_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",

            Event::IndexBuilt => "INDEX_BUILT",
            Event::CatalogReady => "CATALOG_READY",

            Event::OperationTimed => "OPERATION_TIMED",
            Event::PlansAgree => "PLANS_AGREE",
            Event::PlanMismatch => "PLAN_MISMATCH",

            Event::QueryExecuted => "QUERY_COMPLETE",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::PlanMismatch)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
