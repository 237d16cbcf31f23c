//! Column ordering for Sort
//!
//! Records compare column by column in priority order. The first column that
//! differs decides, reversed for descending columns. Records equal on every
//! column are tied.

use std::cmp::Ordering;
use std::fmt;

use crate::record::{Record, Value};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// One sort column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.as_str())
    }
}

static NULL: Value = Value::Null;

/// Compares two optional field values.
///
/// An absent field compares as `Null`, the same way index keys store it.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    a.unwrap_or(&NULL).cmp(b.unwrap_or(&NULL))
}

/// Compares two records by a prioritized column list
pub fn compare_records(a: &Record, b: &Record, columns: &[SortSpec]) -> Ordering {
    columns
        .iter()
        .map(|spec| {
            spec.direction
                .apply(compare_values(a.get(&spec.field), b.get(&spec.field)))
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, created_at: i64) -> Record {
        Record::new().with("id", id).with("created_at", created_at)
    }

    #[test]
    fn test_first_column_decides() {
        let columns = [SortSpec::asc("created_at"), SortSpec::asc("id")];
        assert_eq!(compare_records(&item(9, 1), &item(1, 2), &columns), Ordering::Less);
    }

    #[test]
    fn test_tie_falls_through() {
        let columns = [SortSpec::desc("created_at"), SortSpec::desc("id")];
        assert_eq!(compare_records(&item(2, 5), &item(1, 5), &columns), Ordering::Less);
        assert_eq!(compare_records(&item(1, 5), &item(2, 5), &columns), Ordering::Greater);
    }

    #[test]
    fn test_equal_on_all_columns() {
        let columns = [SortSpec::asc("created_at")];
        assert_eq!(compare_records(&item(1, 5), &item(2, 5), &columns), Ordering::Equal);
        assert_eq!(compare_records(&item(1, 5), &item(2, 6), &[]), Ordering::Equal);
    }

    #[test]
    fn test_missing_sorts_as_null() {
        let with = Record::new().with("price", 10);
        let null = Record::new().with("price", Value::Null);
        let without = Record::new();
        let columns = [SortSpec::asc("price")];

        assert_eq!(compare_records(&without, &with, &columns), Ordering::Less);
        assert_eq!(compare_records(&without, &null, &columns), Ordering::Equal);
        assert_eq!(compare_records(&null, &without, &columns), Ordering::Equal);
        assert_eq!(compare_values(None, Some(&Value::Null)), Ordering::Equal);
        assert_eq!(compare_values(None, None), Ordering::Equal);
    }

    /// Sort agrees with the key an index would build for the same records.
    #[test]
    fn test_order_matches_index_keys() {
        use crate::index::IndexKey;

        let records = [
            Record::new().with("id", 1).with("created_at", Value::Null),
            Record::new().with("id", 2),
            Record::new().with("id", 3).with("created_at", 5),
        ];
        let columns = [SortSpec::asc("created_at"), SortSpec::asc("id")];

        for a in &records {
            for b in &records {
                let by_key = IndexKey::from_record(a, &["created_at", "id"])
                    .cmp(&IndexKey::from_record(b, &["created_at", "id"]));
                assert_eq!(compare_records(a, b, &columns), by_key);
            }
        }
    }

    #[test]
    fn test_sort_spec_display() {
        assert_eq!(SortSpec::desc("created_at").to_string(), "created_at desc");
    }
}
