//! Index keys
//!
//! A key is either a single scalar or a fixed-length tuple of scalars.
//! Tuples compare lexicographically, component by component, and a tuple that
//! is a strict prefix of another orders before it. So `[v]` sorts before every
//! `(v, id)`, which is what makes a one-component start key position a scan
//! at the first entry for `v`.

use std::fmt;

use crate::record::{Record, Value};

/// Key of an index entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexKey {
    /// Single-column key
    Scalar(Value),
    /// Composite key, compared lexicographically
    Tuple(Vec<Value>),
}

impl IndexKey {
    /// Create a scalar key
    pub fn scalar(value: impl Into<Value>) -> Self {
        IndexKey::Scalar(value.into())
    }

    /// Create a composite key
    pub fn tuple<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        IndexKey::Tuple(values.into_iter().map(Into::into).collect())
    }

    /// Extract a key from a record.
    ///
    /// One column yields a scalar key, several yield a tuple in column order.
    /// Absent fields read as NULL.
    pub fn from_record(record: &Record, columns: &[&str]) -> Self {
        match columns {
            [column] => IndexKey::Scalar(record.get_or_null(column)),
            _ => IndexKey::Tuple(columns.iter().map(|c| record.get_or_null(c)).collect()),
        }
    }

    /// Returns the component at `position`.
    ///
    /// A scalar key has exactly one component.
    pub fn component(&self, position: usize) -> Option<&Value> {
        match self {
            IndexKey::Scalar(v) if position == 0 => Some(v),
            IndexKey::Scalar(_) => None,
            IndexKey::Tuple(values) => values.get(position),
        }
    }

    /// Number of components
    pub fn arity(&self) -> usize {
        match self {
            IndexKey::Scalar(_) => 1,
            IndexKey::Tuple(values) => values.len(),
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Scalar(v) => write!(f, "{}", v),
            IndexKey::Tuple(values) => {
                write!(f, "(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<Value> for IndexKey {
    fn from(v: Value) -> Self {
        IndexKey::Scalar(v)
    }
}

impl From<i64> for IndexKey {
    fn from(v: i64) -> Self {
        IndexKey::Scalar(Value::Int(v))
    }
}

impl From<i32> for IndexKey {
    fn from(v: i32) -> Self {
        IndexKey::Scalar(Value::from(v))
    }
}

impl From<&str> for IndexKey {
    fn from(v: &str) -> Self {
        IndexKey::Scalar(Value::from(v))
    }
}

impl From<Vec<Value>> for IndexKey {
    fn from(values: Vec<Value>) -> Self {
        IndexKey::Tuple(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ordering() {
        assert!(IndexKey::from(1) < IndexKey::from(2));
        assert!(IndexKey::from("alice") < IndexKey::from("bob"));
    }

    #[test]
    fn test_tuple_lexicographic() {
        let keys = vec![
            IndexKey::tuple([1, 1]),
            IndexKey::tuple([1, 9]),
            IndexKey::tuple([2, 0]),
            IndexKey::tuple([2, 5]),
        ];
        for i in 1..keys.len() {
            assert!(keys[i - 1] < keys[i]);
        }
    }

    #[test]
    fn test_prefix_orders_first() {
        let prefix = IndexKey::tuple([3]);
        assert!(prefix < IndexKey::tuple([3, i64::MIN]));
        assert!(prefix > IndexKey::tuple([2, i64::MAX]));
    }

    #[test]
    fn test_from_record() {
        let record = Record::new().with("id", 10).with("buyer_id", 3);

        assert_eq!(IndexKey::from_record(&record, &["id"]), IndexKey::from(10));
        assert_eq!(
            IndexKey::from_record(&record, &["buyer_id", "id"]),
            IndexKey::tuple([3, 10])
        );
        assert_eq!(
            IndexKey::from_record(&record, &["missing", "id"]),
            IndexKey::Tuple(vec![Value::Null, Value::Int(10)])
        );
    }

    #[test]
    fn test_component() {
        let scalar = IndexKey::from(5);
        assert_eq!(scalar.component(0), Some(&Value::Int(5)));
        assert_eq!(scalar.component(1), None);
        assert_eq!(scalar.arity(), 1);

        let tuple = IndexKey::tuple([1, 2]);
        assert_eq!(tuple.component(1), Some(&Value::Int(2)));
        assert_eq!(tuple.arity(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(IndexKey::tuple([1, 2]).to_string(), "(1, 2)");
        assert_eq!(IndexKey::from("x").to_string(), "'x'");
    }
}
