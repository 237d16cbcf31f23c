//! CLI argument definitions using clap
//!
//! Commands:
//! - planbench generate [--users N] [--items N] [--seed S]
//! - planbench bench [--buyer-id V] [--limit N]
//! - planbench explain [--buyer-id V] [--limit N]
//! - planbench query buyer --buyer-id V [--plan seq|index]
//! - planbench query recent [--limit N] [--plan seq|index]
//!
//! `--config`, `--data-dir` and `--log-level` are accepted by every command.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// planbench - compare query plans over ordered indexes
#[derive(Parser, Debug)]
#[command(name = "planbench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command; they override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding users.json and items.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Minimum log severity (trace, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a synthetic dataset into the data directory
    Generate {
        /// Number of users
        #[arg(long)]
        users: Option<usize>,

        /// Number of items
        #[arg(long)]
        items: Option<usize>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Time both benchmark queries under both plans
    Bench {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Print the plan trees used by the benchmark
    Explain {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Run one query and print matching records as NDJSON
    Query {
        #[command(subcommand)]
        kind: QueryKind,
    },
}

/// Query parameters for bench and explain
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Buyer for the equality query
    #[arg(long)]
    pub buyer_id: Option<i64>,

    /// Row limit for the ordered query
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum QueryKind {
    /// SELECT * FROM items WHERE buyer_id = V
    Buyer {
        #[arg(long)]
        buyer_id: i64,

        #[arg(long, value_enum, default_value_t = PlanChoice::Index)]
        plan: PlanChoice,
    },

    /// SELECT * FROM items ORDER BY created_at DESC, id DESC LIMIT N
    Recent {
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value_t = PlanChoice::Index)]
        plan: PlanChoice,
    },
}

/// Which of the two equivalent plans to run
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanChoice {
    /// Sequential scan (with sort for ordered queries)
    Seq,
    /// Secondary index scan
    Index,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query_buyer() {
        let cli = Cli::try_parse_from([
            "planbench",
            "query",
            "buyer",
            "--buyer-id",
            "7",
            "--plan",
            "seq",
        ])
        .unwrap();
        match cli.command {
            Command::Query {
                kind: QueryKind::Buyer { buyer_id, plan },
            } => {
                assert_eq!(buyer_id, 7);
                assert_eq!(plan, PlanChoice::Seq);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_after_subcommand() {
        let cli = Cli::try_parse_from(["planbench", "bench", "--data-dir", "/tmp/x", "--limit", "3"])
            .unwrap();
        assert_eq!(cli.global.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Command::Bench { query } => assert_eq!(query.limit, Some(3)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_recent_defaults_to_index_plan() {
        let cli = Cli::try_parse_from(["planbench", "query", "recent"]).unwrap();
        match cli.command {
            Command::Query {
                kind: QueryKind::Recent { limit, plan },
            } => {
                assert_eq!(limit, None);
                assert_eq!(plan, PlanChoice::Index);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_buyer_requires_id() {
        assert!(Cli::try_parse_from(["planbench", "query", "buyer"]).is_err());
    }
}
