//! CLI command implementations
//!
//! Every command resolves its configuration first, then applies the log
//! level, then does its work. Loading and index construction happen once per
//! invocation.

use crate::bench::{queries, INDEX_SCAN, INDEX_SCAN_LIMIT, SEQ_SCAN, SEQ_SCAN_SORT_LIMIT};
use crate::catalog::Catalog;
use crate::dataset::{self, load_dataset};
use crate::executor::QueryPlan;
use crate::observability::{log_event_with_fields, Event, Logger, Timer};

use super::args::{Cli, Command, GlobalArgs, PlanChoice, QueryArgs, QueryKind};
use super::config::Config;
use super::errors::CliResult;
use super::io::{write_records, write_text};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command, &cli.global)
}

/// Dispatch a parsed command
pub fn run_command(command: Command, global: &GlobalArgs) -> CliResult<()> {
    let mut config = Config::resolve(global)?;
    Logger::set_min_severity(config.severity()?);

    match command {
        Command::Generate { users, items, seed } => {
            config.users = users.unwrap_or(config.users);
            config.items = items.unwrap_or(config.items);
            config.seed = seed.unwrap_or(config.seed);
            config.generator_settings().validate()?;
            generate(&config)
        }
        Command::Bench { query } => {
            apply_query_args(&mut config, &query);
            bench(&config)
        }
        Command::Explain { query } => {
            apply_query_args(&mut config, &query);
            explain(&config)
        }
        Command::Query { kind } => query(&config, kind),
    }
}

fn apply_query_args(config: &mut Config, args: &QueryArgs) {
    if let Some(buyer_id) = args.buyer_id {
        config.buyer_id = buyer_id;
    }
    if let Some(limit) = args.limit {
        config.limit = limit;
    }
}

fn boxed<'a>(plan: impl QueryPlan + 'a) -> Box<dyn QueryPlan + 'a> {
    Box::new(plan)
}

fn load_catalog(config: &Config) -> CliResult<Catalog> {
    let dataset = load_dataset(config.data_path())?;
    Ok(Catalog::from_dataset(dataset))
}

/// Write a synthetic dataset to the data directory
pub fn generate(config: &Config) -> CliResult<()> {
    let dataset = dataset::generate(config.generator_settings(), config.data_path())?;
    write_text(&format!(
        "generated {} users and {} items in {}",
        dataset.users.len(),
        dataset.items.len(),
        config.data_dir
    ))
}

/// Run both comparisons and print the report
pub fn bench(config: &Config) -> CliResult<()> {
    let catalog = load_catalog(config)?;
    let benchmark = crate::bench::run(&catalog, &config.bench_options())?;
    write_text(&benchmark.to_string())
}

/// Print every benchmark plan tree
pub fn explain(config: &Config) -> CliResult<()> {
    let catalog = load_catalog(config)?;

    let buyer_plans: [(&str, Box<dyn QueryPlan + '_>); 2] = [
        (
            SEQ_SCAN,
            boxed(queries::buyer_seq_scan(&catalog, config.buyer_id)),
        ),
        (
            INDEX_SCAN,
            boxed(queries::buyer_index_scan(&catalog, config.buyer_id)),
        ),
    ];
    let recent_plans: [(&str, Box<dyn QueryPlan + '_>); 2] = [
        (
            SEQ_SCAN_SORT_LIMIT,
            boxed(queries::recent_sort_limit(&catalog, config.limit)),
        ),
        (
            INDEX_SCAN_LIMIT,
            boxed(queries::recent_index_limit(&catalog, config.limit)),
        ),
    ];

    let mut out = String::new();
    for (sql, plans) in [
        (queries::buyer_sql(config.buyer_id), &buyer_plans),
        (queries::recent_sql(config.limit), &recent_plans),
    ] {
        out.push_str(&sql);
        out.push('\n');
        for (label, plan) in plans.iter() {
            out.push_str(&format!("-- {}\n", label));
            out.push_str(&plan.explain().to_string());
        }
        out.push('\n');
    }

    write_text(&out)
}

/// Run a single query and stream matching records to stdout
pub fn query(config: &Config, kind: QueryKind) -> CliResult<()> {
    let catalog = load_catalog(config)?;

    let (sql, choice, plan): (String, PlanChoice, Box<dyn QueryPlan + '_>) = match kind {
        QueryKind::Buyer { buyer_id, plan } => {
            let built: Box<dyn QueryPlan + '_> = match plan {
                PlanChoice::Seq => boxed(queries::buyer_seq_scan(&catalog, buyer_id)),
                PlanChoice::Index => boxed(queries::buyer_index_scan(&catalog, buyer_id)),
            };
            (queries::buyer_sql(buyer_id), plan, built)
        }
        QueryKind::Recent { limit, plan } => {
            let limit = limit.unwrap_or(config.limit);
            let built: Box<dyn QueryPlan + '_> = match plan {
                PlanChoice::Seq => boxed(queries::recent_sort_limit(&catalog, limit)),
                PlanChoice::Index => boxed(queries::recent_index_limit(&catalog, limit)),
            };
            (queries::recent_sql(limit), plan, built)
        }
    };

    let timer = Timer::new();
    let rows = write_records(plan.run())?;

    log_event_with_fields(
        Event::QueryExecuted,
        &[
            ("elapsed_ms", timer.elapsed_ms().as_str()),
            (
                "plan",
                match choice {
                    PlanChoice::Seq => "seq",
                    PlanChoice::Index => "index",
                },
            ),
            ("query", sql.as_str()),
            ("rows", rows.to_string().as_str()),
        ],
    );

    Ok(())
}
