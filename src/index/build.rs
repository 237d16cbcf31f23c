//! Bulk construction of tables and secondary indexes from records
//!
//! A table is keyed by primary key and owns its records. A secondary index is
//! keyed by one or more columns and stores the primary key of the owning
//! record, which is resolved against the table at scan time.

use crate::record::Record;

use super::key::IndexKey;
use super::ordered::OrderedIndex;

/// Primary index: primary key -> record
pub type Table = OrderedIndex<Record>;

/// Secondary index: indexed columns -> primary key
pub type SecondaryIndex = OrderedIndex<IndexKey>;

impl OrderedIndex<Record> {
    /// Build a table keyed by `pk_column`
    pub fn primary<I>(name: impl Into<String>, records: I, pk_column: &str) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        Self::bulk_load(
            name,
            records
                .into_iter()
                .map(|record| (IndexKey::from_record(&record, &[pk_column]), record)),
        )
    }

    /// Iterate records in primary key order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries().iter().map(|entry| &entry.payload)
    }
}

impl OrderedIndex<IndexKey> {
    /// Build a secondary index keyed by `(columns..., pk_column)`.
    ///
    /// Appending the primary key makes every key unique, so traversal order
    /// is fully determined.
    pub fn secondary<'r, I>(
        name: impl Into<String>,
        records: I,
        columns: &[&str],
        pk_column: &str,
    ) -> Self
    where
        I: IntoIterator<Item = &'r Record>,
    {
        let key_columns: Vec<&str> = columns.iter().copied().chain([pk_column]).collect();
        Self::bulk_load(
            name,
            records.into_iter().map(|record| {
                (
                    IndexKey::Tuple(key_columns.iter().map(|c| record.get_or_null(c)).collect()),
                    IndexKey::from_record(record, &[pk_column]),
                )
            }),
        )
    }

    /// Build a secondary index keyed by `columns` alone.
    ///
    /// Only suitable for columns that are unique in practice; equal keys keep
    /// input order.
    pub fn secondary_unique<'r, I>(
        name: impl Into<String>,
        records: I,
        columns: &[&str],
        pk_column: &str,
    ) -> Self
    where
        I: IntoIterator<Item = &'r Record>,
    {
        Self::bulk_load(
            name,
            records.into_iter().map(|record| {
                (
                    IndexKey::from_record(record, columns),
                    IndexKey::from_record(record, &[pk_column]),
                )
            }),
        )
    }
}
