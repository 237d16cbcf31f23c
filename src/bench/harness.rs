//! Timing harness
//!
//! Each named operation runs its plan to completion once and records the
//! wall-clock time and row count. Results render as a fixed-width table whose
//! label column is `label_width` characters wide.

use std::fmt;
use std::time::Duration;

use crate::executor::QueryPlan;
use crate::observability::{log_event_with_fields, Event, Timer};
use crate::record::Record;

use super::errors::{BenchError, BenchResult};

/// One timed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub label: String,
    pub elapsed: Duration,
    pub rows: usize,
}

impl Measurement {
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Query(String),
    Measurement(Measurement),
}

/// Collected measurements, grouped under the query they belong to
#[derive(Debug, Clone)]
pub struct Benchmark {
    label_width: usize,
    lines: Vec<Line>,
}

impl Benchmark {
    pub fn new(label_width: usize) -> Self {
        Self {
            label_width,
            lines: Vec::new(),
        }
    }

    /// Starts a new group of measurements
    pub fn query(&mut self, sql: impl Into<String>) {
        self.lines.push(Line::Query(sql.into()));
    }

    /// Runs `plan` to completion and records how long it took
    pub fn measure<'p, P>(&mut self, label: &str, plan: &'p P) -> Vec<&'p Record>
    where
        P: QueryPlan + ?Sized,
    {
        let timer = Timer::new();
        let rows = plan.materialize();
        let elapsed = timer.elapsed();

        log_event_with_fields(
            Event::OperationTimed,
            &[
                ("elapsed_us", elapsed.as_micros().to_string().as_str()),
                ("label", label),
                ("plan", plan.name()),
                ("rows", rows.len().to_string().as_str()),
            ],
        );

        self.lines.push(Line::Measurement(Measurement {
            label: label.to_string(),
            elapsed,
            rows: rows.len(),
        }));
        rows
    }

    /// All measurements in the order they were taken
    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.lines.iter().filter_map(|line| match line {
            Line::Measurement(m) => Some(m),
            Line::Query(_) => None,
        })
    }

    pub fn find(&self, label: &str) -> Option<&Measurement> {
        self.measurements().find(|m| m.label == label)
    }

    pub fn label_width(&self) -> usize {
        self.label_width
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.label_width;
        writeln!(f, "{:<width$}{:>14}{:>10}", "", "real (ms)", "rows", width = width)?;
        for line in &self.lines {
            match line {
                Line::Query(sql) => writeln!(f, "{}", sql)?,
                Line::Measurement(m) => writeln!(
                    f,
                    "{:<width$}{:>14.3}{:>10}",
                    m.label,
                    m.millis(),
                    m.rows,
                    width = width
                )?,
            }
        }
        Ok(())
    }
}

/// Checks that two plans returned the same records in the same order
pub fn check_agreement(
    query: &str,
    left_label: &str,
    left: &[&Record],
    right_label: &str,
    right: &[&Record],
) -> BenchResult<()> {
    let position = left
        .iter()
        .zip(right)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| left.len().min(right.len()));

    if position == left.len() && position == right.len() {
        log_event_with_fields(
            Event::PlansAgree,
            &[
                ("left", left_label),
                ("query", query),
                ("right", right_label),
                ("rows", left.len().to_string().as_str()),
            ],
        );
        return Ok(());
    }

    log_event_with_fields(
        Event::PlanMismatch,
        &[
            ("left", left_label),
            ("left_rows", left.len().to_string().as_str()),
            ("position", position.to_string().as_str()),
            ("query", query),
            ("right", right_label),
            ("right_rows", right.len().to_string().as_str()),
        ],
    );

    Err(BenchError::PlanMismatch {
        query: query.to_string(),
        left: left_label.to_string(),
        right: right_label.to_string(),
        left_rows: left.len(),
        right_rows: right.len(),
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SeqScan;
    use crate::index::Table;

    fn table() -> Table {
        Table::primary(
            "items",
            (1..=4).map(|id| Record::new().with("id", id)),
            "id",
        )
    }

    #[test]
    fn test_measure_returns_rows() {
        let table = table();
        let plan = SeqScan::new(&table);
        let mut bench = Benchmark::new(20);

        let rows = bench.measure("SeqScan", &plan);

        assert_eq!(rows.len(), 4);
        assert_eq!(bench.find("SeqScan").map(|m| m.rows), Some(4));
        assert!(bench.find("IndexScan").is_none());
    }

    #[test]
    fn test_report_layout() {
        let table = table();
        let plan = SeqScan::new(&table);
        let mut bench = Benchmark::new(12);
        bench.query("SELECT * FROM items;");
        bench.measure("SeqScan", &plan);

        let report = bench.to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("real (ms)      rows"));
        assert_eq!(lines[1], "SELECT * FROM items;");
        assert!(lines[2].starts_with("SeqScan     "));
        assert!(lines[2].ends_with("         4"));
        assert_eq!(lines[2].len(), 12 + 14 + 10);
    }

    #[test]
    fn test_agreement() {
        let table = table();
        let rows: Vec<&Record> = table.records().collect();
        assert!(check_agreement("q", "a", &rows, "b", &rows).is_ok());
    }

    #[test]
    fn test_disagreement_on_order() {
        let table = table();
        let forward: Vec<&Record> = table.records().collect();
        let mut backward = forward.clone();
        backward.reverse();

        let err = check_agreement("q", "a", &forward, "b", &backward).unwrap_err();
        assert!(matches!(err, BenchError::PlanMismatch { position: 0, .. }));
    }

    #[test]
    fn test_disagreement_on_length() {
        let table = table();
        let all: Vec<&Record> = table.records().collect();
        let some = &all[..2];

        let err = check_agreement("q", "a", &all, "b", some).unwrap_err();
        assert_eq!(
            err,
            BenchError::PlanMismatch {
                query: "q".into(),
                left: "a".into(),
                right: "b".into(),
                left_rows: 4,
                right_rows: 2,
                position: 2,
            }
        );
    }
}
