//! Plan Equivalence Tests
//!
//! Tests that differently-shaped plans for the same query agree:
//! - Equality: SeqScan + filter == IndexScan over (buyer_id, id)
//! - Order + limit: Limit(Sort(SeqScan)) == Limit(IndexScan backward)
//! - Range: Sort(SeqScan + range filter) == IndexScan from lower bound while <= upper
//! - Null and absent sort fields order the same under both plans
//! - Plans are restartable and Limit respects its boundary

use std::collections::BTreeSet;

use planbench::bench::queries;
use planbench::catalog::Catalog;
use planbench::dataset::{Generator, GeneratorSettings};
use planbench::executor::{
    key_prefix_at_most, IndexScan, Limit, Predicate, QueryPlan, SeqScan, Sort, SortSpec,
};
use planbench::index::IndexKey;
use planbench::record::{Record, Value};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn catalog(seed: u64) -> Catalog {
    let dataset = Generator::new(GeneratorSettings {
        users: 30,
        items: 2_000,
        seed,
    })
    .unwrap()
    .generate()
    .unwrap();
    Catalog::from_dataset(dataset)
}

fn ids(records: &[&Record]) -> Vec<Value> {
    records.iter().map(|r| r.get_or_null("id")).collect()
}

fn distinct_buyers(catalog: &Catalog) -> BTreeSet<i64> {
    catalog
        .items
        .records()
        .filter_map(|r| r.get("buyer_id").and_then(Value::as_i64))
        .collect()
}

// =============================================================================
// Equality Predicate Tests
// =============================================================================

/// Every buyer_id present yields the same sequence under both plans.
#[test]
fn test_buyer_plans_agree_for_every_buyer() {
    let catalog = catalog(11);
    let buyers = distinct_buyers(&catalog);
    assert!(buyers.len() > 1);

    for buyer_id in buyers {
        let seq = queries::buyer_seq_scan(&catalog, buyer_id);
        let idx = queries::buyer_index_scan(&catalog, buyer_id);

        let seq_rows = seq.materialize();
        let idx_rows = idx.materialize();
        assert!(!seq_rows.is_empty());
        assert_eq!(seq_rows, idx_rows, "buyer_id = {}", buyer_id);
    }
}

/// Index scan output is in primary key order, same as the table.
#[test]
fn test_buyer_index_scan_in_pk_order() {
    let catalog = catalog(12);
    let plan = queries::buyer_index_scan(&catalog, 0);
    let rows = plan.materialize();

    let keys: Vec<_> = rows.iter().map(|r| IndexKey::from_record(r, &["id"])).collect();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
}

/// A buyer with no purchases returns nothing from either plan.
#[test]
fn test_buyer_plans_agree_when_empty() {
    let catalog = catalog(13);
    let seq = queries::buyer_seq_scan(&catalog, 10_000);
    let idx = queries::buyer_index_scan(&catalog, 10_000);
    assert!(seq.materialize().is_empty());
    assert!(idx.materialize().is_empty());
}

// =============================================================================
// Order + Limit Tests
// =============================================================================

#[test]
fn test_recent_plans_agree() {
    for seed in [21, 22, 23] {
        let catalog = catalog(seed);
        for limit in [1, 10, 100] {
            let sorted = queries::recent_sort_limit(&catalog, limit);
            let indexed = queries::recent_index_limit(&catalog, limit);

            let sorted_rows = sorted.materialize();
            let indexed_rows = indexed.materialize();
            assert_eq!(sorted_rows.len(), limit);
            assert_eq!(ids(&sorted_rows), ids(&indexed_rows), "seed {} limit {}", seed, limit);
        }
    }
}

/// Without a limit the full orderings match too.
#[test]
fn test_full_descending_orders_agree() {
    let catalog = catalog(24);
    let sorted = Sort::new(
        SeqScan::new(&catalog.items),
        vec![SortSpec::desc("created_at"), SortSpec::desc("id")],
    );
    let indexed = IndexScan::new(&catalog.items, &catalog.items_created_at_idx).backward();

    assert_eq!(sorted.materialize(), indexed.materialize());
}

/// Null and absent created_at sort together under both plans.
#[test]
fn test_recent_plans_agree_on_null_and_missing() {
    let items: Vec<Record> = [
        json!({"id": 1, "buyer_id": 0, "created_at": null}),
        json!({"id": 2, "buyer_id": 0}),
        json!({"id": 3, "buyer_id": 1, "created_at": "2019-08-12 15:00:00 +0900"}),
        json!({"id": 4, "buyer_id": 1, "created_at": null}),
        json!({"id": 5, "buyer_id": 2}),
    ]
    .iter()
    .map(|line| Record::from_json(line).unwrap())
    .collect();
    let catalog = Catalog::build(Vec::new(), items);

    for limit in [1, 3, 10] {
        let sorted = queries::recent_sort_limit(&catalog, limit);
        let indexed = queries::recent_index_limit(&catalog, limit);
        assert_eq!(
            ids(&sorted.materialize()),
            ids(&indexed.materialize()),
            "limit {}",
            limit
        );
    }

    let all = queries::recent_index_limit(&catalog, 10);
    assert_eq!(
        ids(&all.materialize()),
        vec![
            Value::Int(3),
            Value::Int(5),
            Value::Int(4),
            Value::Int(2),
            Value::Int(1)
        ]
    );
}

// =============================================================================
// Range Tests
// =============================================================================

/// created_at BETWEEN lo AND hi, ordered by (created_at, id).
#[test]
fn test_created_at_range_agrees() {
    let catalog = catalog(31);
    let timestamps: Vec<Value> = catalog
        .items_created_at_idx
        .iter(None)
        .filter_map(|e| e.key.component(0).cloned())
        .collect();
    let lo = timestamps[timestamps.len() / 4].clone();
    let hi = timestamps[timestamps.len() / 2].clone();

    let seq = Sort::new(
        SeqScan::new(&catalog.items).predicates(vec![
            Predicate::gte("created_at", lo.clone()),
            Predicate::lte("created_at", hi.clone()),
        ]),
        vec![SortSpec::asc("created_at"), SortSpec::asc("id")],
    );
    let idx = IndexScan::new(&catalog.items, &catalog.items_created_at_idx)
        .start(IndexKey::tuple([lo]))
        .index_filter_described(key_prefix_at_most(hi), "created_at <= hi");

    let seq_rows = seq.materialize();
    let idx_rows = idx.materialize();
    assert!(seq_rows.len() >= timestamps.len() / 4);
    assert_eq!(seq_rows, idx_rows);
}

// =============================================================================
// Restartability Tests
// =============================================================================

#[test]
fn test_run_twice_yields_same_sequence() {
    let catalog = catalog(41);
    let plans: Vec<Box<dyn QueryPlan + '_>> = vec![
        Box::new(queries::buyer_seq_scan(&catalog, 1)),
        Box::new(queries::buyer_index_scan(&catalog, 1)),
        Box::new(queries::recent_sort_limit(&catalog, 10)),
        Box::new(queries::recent_index_limit(&catalog, 10)),
    ];

    for plan in &plans {
        let first: Vec<&Record> = plan.run().collect();
        let second: Vec<&Record> = plan.run().collect();
        assert_eq!(first, second, "{}", plan.name());
    }
}

/// Partially consuming one run leaves a second run untouched.
#[test]
fn test_runs_are_independent() {
    let catalog = catalog(42);
    let plan = queries::recent_index_limit(&catalog, 10);

    let mut a = plan.run();
    let b = plan.run();
    a.next();
    a.next();

    assert_eq!(b.count(), 10);
    assert_eq!(a.count(), 8);
}

// =============================================================================
// Limit Boundary Tests
// =============================================================================

#[test]
fn test_limit_zero_is_empty() {
    let catalog = catalog(51);
    assert_eq!(Limit::new(SeqScan::new(&catalog.items), 0).run().count(), 0);
    assert_eq!(queries::recent_sort_limit(&catalog, 0).run().count(), 0);
}

#[test]
fn test_limit_at_or_past_size_is_identity() {
    let catalog = catalog(52);
    let full = SeqScan::new(&catalog.items);
    let expected = full.materialize();

    for limit in [expected.len(), expected.len() + 1, usize::MAX] {
        let limited = Limit::new(SeqScan::new(&catalog.items), limit);
        assert_eq!(limited.materialize(), expected);
    }
}
