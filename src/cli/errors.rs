//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::bench::BenchError;
use crate::dataset::{GenerateError, LoadError};

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// Dataset could not be loaded
    LoadFailed,
    /// Dataset could not be generated
    GenerateFailed,
    /// Equivalent plans returned different results
    PlanMismatch,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PLAN_CLI_CONFIG_ERROR",
            Self::IoError => "PLAN_CLI_IO_ERROR",
            Self::LoadFailed => "PLAN_CLI_LOAD_FAILED",
            Self::GenerateFailed => "PLAN_CLI_GENERATE_FAILED",
            Self::PlanMismatch => "PLAN_CLI_PLAN_MISMATCH",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::new(CliErrorCode::LoadFailed, format!("[{}] {}", e.code(), e))
    }
}

impl From<GenerateError> for CliError {
    fn from(e: GenerateError) -> Self {
        Self::new(CliErrorCode::GenerateFailed, format!("[{}] {}", e.code(), e))
    }
}

impl From<BenchError> for CliError {
    fn from(e: BenchError) -> Self {
        Self::new(CliErrorCode::PlanMismatch, format!("[{}] {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
