//! Configuration file
//!
//! A JSON object; every field is optional:
//!
//! ```json
//! {
//!   "data_dir": "data",
//!   "buyer_id": 1,
//!   "limit": 10,
//!   "label_width": 40,
//!   "seed": 42,
//!   "users": 1000,
//!   "items": 50000,
//!   "log_level": "info"
//! }
//! ```
//!
//! Command line flags override file values. Without `--config` the defaults
//! above are used.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bench::BenchOptions;
use crate::dataset::GeneratorSettings;
use crate::observability::{log_event_with_fields, Event, Severity};

use super::args::GlobalArgs;
use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding users.json and items.json
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Buyer for the equality query
    #[serde(default = "default_buyer_id")]
    pub buyer_id: i64,

    /// Row limit for the ordered query
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Width of the label column in the bench report
    #[serde(default = "default_label_width")]
    pub label_width: usize,

    /// Generator seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Generated user count
    #[serde(default = "default_users")]
    pub users: usize,

    /// Generated item count
    #[serde(default = "default_items")]
    pub items: usize,

    /// Minimum log severity
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}
fn default_buyer_id() -> i64 {
    1
}
fn default_limit() -> usize {
    10
}
fn default_label_width() -> usize {
    40
}
fn default_seed() -> u64 {
    42
}
fn default_users() -> usize {
    1000
}
fn default_items() -> usize {
    50_000
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            buyer_id: default_buyer_id(),
            limit: default_limit(),
            label_width: default_label_width(),
            seed: default_seed(),
            users: default_users(),
            items: default_items(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Config file (or defaults) with global flags applied
    pub fn resolve(global: &GlobalArgs) -> CliResult<Self> {
        let mut config = match &global.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(data_dir) = &global.data_dir {
            config.data_dir = data_dir.display().to_string();
        }
        if let Some(log_level) = &global.log_level {
            config.log_level = log_level.clone();
        }
        config.validate()?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                (
                    "config",
                    global
                        .config
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<defaults>".to_string())
                        .as_str(),
                ),
                ("data_dir", config.data_dir.as_str()),
            ],
        );

        Ok(config)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.data_dir.is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if self.label_width == 0 {
            return Err(CliError::config_error("label_width must be > 0"));
        }

        self.severity()?;

        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(CliError::config_error)
    }

    pub fn bench_options(&self) -> BenchOptions {
        BenchOptions {
            buyer_id: self.buyer_id,
            limit: self.limit,
            label_width: self.label_width,
        }
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            users: self.users,
            items: self.items,
            seed: self.seed,
        }
    }
}
