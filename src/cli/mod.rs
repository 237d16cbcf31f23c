//! CLI module for planbench
//!
//! Provides command-line interface for:
//! - generate: Write a synthetic dataset
//! - bench: Time equivalent plans and check they agree
//! - explain: Print plan trees
//! - query: One-shot query execution, NDJSON on stdout

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, GlobalArgs, PlanChoice, QueryArgs, QueryKind};
pub use commands::{bench, explain, generate, query, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_records, write_records_to, write_text};
