//! Tables and secondary indexes of the marketplace dataset
//!
//! | index                    | key                  | payload |
//! |--------------------------|----------------------|---------|
//! | `users`                  | `id`                 | record  |
//! | `users_account_name_idx` | `account_name`       | `id`    |
//! | `items`                  | `id`                 | record  |
//! | `items_buyer_id_idx`     | `(buyer_id, id)`     | `id`    |
//! | `items_created_at_idx`   | `(created_at, id)`   | `id`    |
//!
//! All indexes are built once and never mutated afterwards.

use crate::dataset::Dataset;
use crate::index::{IndexKey, OrderedIndex, SecondaryIndex, Table};
use crate::observability::{log_event_with_fields, Event, Logger, Timer};
use crate::record::Record;

/// Primary key column of both tables
pub const PK_COLUMN: &str = "id";

/// All tables and indexes used by the bench queries
#[derive(Debug)]
pub struct Catalog {
    pub users: Table,
    pub users_account_name_idx: SecondaryIndex,
    pub items: Table,
    pub items_buyer_id_idx: SecondaryIndex,
    pub items_created_at_idx: SecondaryIndex,
}

impl Catalog {
    /// Build every table and index from raw records
    pub fn build(users: Vec<Record>, items: Vec<Record>) -> Self {
        let timer = Timer::new();

        let users_account_name_idx = logged(SecondaryIndex::secondary_unique(
            "users_account_name_idx",
            &users,
            &["account_name"],
            PK_COLUMN,
        ));
        let users = logged(Table::primary("users", users, PK_COLUMN));

        let items_buyer_id_idx = logged(SecondaryIndex::secondary(
            "items_buyer_id_idx",
            &items,
            &["buyer_id"],
            PK_COLUMN,
        ));
        let items_created_at_idx = logged(SecondaryIndex::secondary(
            "items_created_at_idx",
            &items,
            &["created_at"],
            PK_COLUMN,
        ));
        let items = logged(Table::primary("items", items, PK_COLUMN));

        log_event_with_fields(
            Event::CatalogReady,
            &[
                ("elapsed_ms", timer.elapsed_ms().as_str()),
                ("items", items.len().to_string().as_str()),
                ("users", users.len().to_string().as_str()),
            ],
        );

        Self {
            users,
            users_account_name_idx,
            items,
            items_buyer_id_idx,
            items_created_at_idx,
        }
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        Self::build(dataset.users, dataset.items)
    }

    /// Point lookup of a user through `users_account_name_idx`
    pub fn user_by_account_name(&self, account_name: &str) -> Option<&Record> {
        let pk = self
            .users_account_name_idx
            .get(&IndexKey::from(account_name))?;
        self.users.get(pk)
    }

    /// `(name, entries)` for every index, in declaration order
    pub fn index_sizes(&self) -> Vec<(&str, usize)> {
        vec![
            (self.users.name(), self.users.len()),
            (
                self.users_account_name_idx.name(),
                self.users_account_name_idx.len(),
            ),
            (self.items.name(), self.items.len()),
            (self.items_buyer_id_idx.name(), self.items_buyer_id_idx.len()),
            (
                self.items_created_at_idx.name(),
                self.items_created_at_idx.len(),
            ),
        ]
    }

    /// Number of index entries whose primary key has no record in the table
    pub fn dangling_references(&self) -> usize {
        let check = |index: &SecondaryIndex, table: &Table| {
            index
                .entries()
                .iter()
                .filter(|entry| table.get(&entry.payload).is_none())
                .count()
        };
        check(&self.users_account_name_idx, &self.users)
            + check(&self.items_buyer_id_idx, &self.items)
            + check(&self.items_created_at_idx, &self.items)
    }
}

fn logged<P>(index: OrderedIndex<P>) -> OrderedIndex<P> {
    log_event_with_fields(
        Event::IndexBuilt,
        &[("entries", index.len().to_string().as_str()), ("index", index.name())],
    );
    if index.is_empty() {
        Logger::warn("INDEX_EMPTY", &[("index", index.name())]);
    }
    index
}
