//! Dataset files for planbench
//!
//! A dataset is a directory holding two NDJSON tables, `users.json` and
//! `items.json`, one JSON object per line.
//!
//! - `reader`: loads tables into records
//! - `generator`: writes a seeded synthetic dataset

mod errors;
mod generator;
mod reader;

pub use errors::{GenerateError, GenerateResult, LoadError, LoadResult};
pub use generator::{generate, write_table, Generator, GeneratorSettings};
pub use reader::{load_dataset, load_table, read_records};

use crate::record::Record;

/// File name of the users table inside a data directory
pub const USERS_FILE: &str = "users.json";

/// File name of the items table inside a data directory
pub const ITEMS_FILE: &str = "items.json";

/// Raw table contents, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub users: Vec<Record>,
    pub items: Vec<Record>,
}
