//! # Bench Errors

use thiserror::Error;

/// Result type for bench runs
pub type BenchResult<T> = Result<T, BenchError>;

/// Bench failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenchError {
    /// Two plans for the same query returned different sequences
    #[error(
        "plans disagree on '{query}': {left} returned {left_rows} rows, {right} returned {right_rows} rows, first difference at row {position}"
    )]
    PlanMismatch {
        query: String,
        left: String,
        right: String,
        left_rows: usize,
        right_rows: usize,
        position: usize,
    },
}

impl BenchError {
    pub fn code(&self) -> &'static str {
        match self {
            BenchError::PlanMismatch { .. } => "PLAN_BENCH_MISMATCH",
        }
    }
}
