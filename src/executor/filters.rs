//! Predicates over records and index keys
//!
//! Record predicates are strict: no type coercion, exact comparisons only.
//! A missing or NULL field never matches. Range operators only match values
//! of the same kind as the bound.
//!
//! Key filters are early-stop predicates. A scan consumes entries while the
//! key filter holds and stops at the first failure, so a key filter must be
//! true for a contiguous prefix of the traversal and false afterwards.

use std::fmt;
use std::sync::Arc;

use crate::index::IndexKey;
use crate::record::{Record, Value};

/// Predicate over index keys
pub type KeyFilter = Arc<dyn Fn(&IndexKey) -> bool + Send + Sync>;

/// Predicate over records
pub type RecordFilter = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Key filter that always holds
pub fn all_keys() -> KeyFilter {
    Arc::new(|_| true)
}

/// Record filter that always holds
pub fn all_records() -> RecordFilter {
    Arc::new(|_| true)
}

/// Key filter: first key component equals `value`.
///
/// Used for equality scans over `(column, pk)` indexes.
pub fn key_prefix_eq(value: impl Into<Value>) -> KeyFilter {
    let value = value.into();
    Arc::new(move |key: &IndexKey| key.component(0) == Some(&value))
}

/// Key filter: first key component is `<= bound`. Ends a forward range scan.
pub fn key_prefix_at_most(bound: impl Into<Value>) -> KeyFilter {
    let bound = bound.into();
    Arc::new(move |key: &IndexKey| key.component(0).is_some_and(|v| *v <= bound))
}

/// Key filter: first key component is `>= bound`. Ends a backward range scan.
pub fn key_prefix_at_least(bound: impl Into<Value>) -> KeyFilter {
    let bound = bound.into();
    Arc::new(move |key: &IndexKey| key.component(0).is_some_and(|v| *v >= bound))
}

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: field = value
    Eq(Value),
    /// Greater than or equal: field >= value
    Gte(Value),
    /// Greater than: field > value
    Gt(Value),
    /// Less than or equal: field <= value
    Lte(Value),
    /// Less than: field < value
    Lt(Value),
}

impl FilterOp {
    /// Operator symbol for explain output
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "=",
            FilterOp::Gte(_) => ">=",
            FilterOp::Gt(_) => ">",
            FilterOp::Lte(_) => "<=",
            FilterOp::Lt(_) => "<",
        }
    }

    fn operand(&self) -> &Value {
        match self {
            FilterOp::Eq(v) | FilterOp::Gte(v) | FilterOp::Gt(v) | FilterOp::Lte(v) | FilterOp::Lt(v) => v,
        }
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq(value.into()),
        }
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte(value.into()),
        }
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gt(value.into()),
        }
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte(value.into()),
        }
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lt(value.into()),
        }
    }

    /// Checks if a record matches this predicate
    pub fn matches(&self, record: &Record) -> bool {
        let actual = match record.get(&self.field) {
            Some(v) if !v.is_null() => v,
            _ => return false,
        };

        let bound = self.op.operand();
        if !actual.same_kind(bound) {
            return false;
        }

        match &self.op {
            FilterOp::Eq(_) => actual == bound,
            FilterOp::Gte(_) => actual >= bound,
            FilterOp::Gt(_) => actual > bound,
            FilterOp::Lte(_) => actual <= bound,
            FilterOp::Lt(_) => actual < bound,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op.symbol(), self.op.operand())
    }
}

/// Evaluates predicate lists against records
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if a record matches all predicates (AND semantics)
    pub fn matches(record: &Record, predicates: &[Predicate]) -> bool {
        predicates.iter().all(|pred| pred.matches(record))
    }

    /// Turns a predicate list into a record filter
    pub fn into_filter(predicates: Vec<Predicate>) -> RecordFilter {
        Arc::new(move |record: &Record| Self::matches(record, &predicates))
    }

    /// Describes a predicate list for explain output
    pub fn describe(predicates: &[Predicate]) -> String {
        predicates
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}
