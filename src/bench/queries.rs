//! The two benchmark queries, each as a pair of equivalent plans
//!
//! ```text
//! SELECT * FROM items WHERE buyer_id = ?
//!   buyer_seq_scan     SeqScan(items, filter buyer_id = ?)
//!   buyer_index_scan   IndexScan(items_buyer_id_idx from (?), while buyer_id = ?)
//!
//! SELECT * FROM items ORDER BY created_at DESC, id DESC LIMIT ?
//!   recent_sort_limit  Limit(Sort(SeqScan(items)))
//!   recent_index_limit Limit(IndexScan(items_created_at_idx, backward))
//! ```

use crate::catalog::Catalog;
use crate::executor::{key_prefix_eq, IndexScan, Limit, Predicate, SeqScan, Sort, SortSpec};
use crate::index::IndexKey;

pub fn buyer_sql(buyer_id: i64) -> String {
    format!("SELECT * FROM items WHERE buyer_id = {};", buyer_id)
}

pub fn recent_sql(limit: usize) -> String {
    format!(
        "SELECT * FROM items ORDER BY created_at DESC, id DESC LIMIT {};",
        limit
    )
}

/// Full scan of `items` keeping rows bought by `buyer_id`
pub fn buyer_seq_scan(catalog: &Catalog, buyer_id: i64) -> SeqScan<'_> {
    SeqScan::new(&catalog.items).predicates(vec![Predicate::eq("buyer_id", buyer_id)])
}

/// Range scan of `items_buyer_id_idx` over the `buyer_id` prefix
pub fn buyer_index_scan(catalog: &Catalog, buyer_id: i64) -> IndexScan<'_> {
    IndexScan::new(&catalog.items, &catalog.items_buyer_id_idx)
        .start(IndexKey::tuple([buyer_id]))
        .index_filter_described(key_prefix_eq(buyer_id), format!("buyer_id = {}", buyer_id))
}

/// Newest items by sorting the whole table
pub fn recent_sort_limit(catalog: &Catalog, limit: usize) -> Limit<'_> {
    Limit::new(
        Sort::new(
            SeqScan::new(&catalog.items),
            vec![SortSpec::desc("created_at"), SortSpec::desc("id")],
        ),
        limit,
    )
}

/// Newest items by walking `items_created_at_idx` from the end
pub fn recent_index_limit(catalog: &Catalog, limit: usize) -> Limit<'_> {
    Limit::new(
        IndexScan::new(&catalog.items, &catalog.items_created_at_idx).backward(),
        limit,
    )
}
