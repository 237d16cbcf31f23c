//! Plan comparison benchmark
//!
//! Runs each benchmark query through two equivalent plans, times both and
//! checks that they return identical sequences.
//!
//! # Invariants
//!
//! - Every plan is run to completion exactly once per measurement
//! - A run either reports every measurement or fails with `PlanMismatch`

mod errors;
mod harness;
pub mod queries;

pub use errors::{BenchError, BenchResult};
pub use harness::{check_agreement, Benchmark, Measurement};

use crate::catalog::Catalog;
use crate::observability::ObservationScope;

pub const SEQ_SCAN: &str = "SeqScan";
pub const INDEX_SCAN: &str = "IndexScan";
pub const SEQ_SCAN_SORT_LIMIT: &str = "SeqScan + Sort + Limit";
pub const INDEX_SCAN_LIMIT: &str = "IndexScan + Limit";

/// Parameters of one bench run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchOptions {
    pub buyer_id: i64,
    pub limit: usize,
    pub label_width: usize,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            buyer_id: 1,
            limit: 10,
            label_width: 40,
        }
    }
}

/// Run both comparisons against `catalog`
pub fn run(catalog: &Catalog, options: &BenchOptions) -> BenchResult<Benchmark> {
    let buyer_id = options.buyer_id.to_string();
    let limit = options.limit.to_string();
    let scope = ObservationScope::with_fields(
        "BENCH",
        &[("buyer_id", buyer_id.as_str()), ("limit", limit.as_str())],
    );

    let mut bench = Benchmark::new(options.label_width);

    let result = compare_buyer(&mut bench, catalog, options.buyer_id)
        .and_then(|_| compare_recent(&mut bench, catalog, options.limit));

    match result {
        Ok(()) => {
            let measurements = bench.measurements().count().to_string();
            scope.complete_with_fields(&[("measurements", measurements.as_str())]);
            Ok(bench)
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e)
        }
    }
}

fn compare_buyer(bench: &mut Benchmark, catalog: &Catalog, buyer_id: i64) -> BenchResult<()> {
    let sql = queries::buyer_sql(buyer_id);
    bench.query(sql.as_str());

    let seq_scan = queries::buyer_seq_scan(catalog, buyer_id);
    let index_scan = queries::buyer_index_scan(catalog, buyer_id);

    let seq_rows = bench.measure(SEQ_SCAN, &seq_scan);
    let index_rows = bench.measure(INDEX_SCAN, &index_scan);

    check_agreement(&sql, SEQ_SCAN, &seq_rows, INDEX_SCAN, &index_rows)
}

fn compare_recent(bench: &mut Benchmark, catalog: &Catalog, limit: usize) -> BenchResult<()> {
    let sql = queries::recent_sql(limit);
    bench.query(sql.as_str());

    let sort_limit = queries::recent_sort_limit(catalog, limit);
    let index_limit = queries::recent_index_limit(catalog, limit);

    let sort_rows = bench.measure(SEQ_SCAN_SORT_LIMIT, &sort_limit);
    let index_rows = bench.measure(INDEX_SCAN_LIMIT, &index_limit);

    check_agreement(
        &sql,
        SEQ_SCAN_SORT_LIMIT,
        &sort_rows,
        INDEX_SCAN_LIMIT,
        &index_rows,
    )
}
