//! # Dataset Errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::record::RecordError;

/// Result type for loading tables
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for writing generated tables
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors raised while reading NDJSON tables
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}:{line}: invalid JSON: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}:{line}: {source}")]
    Record {
        path: PathBuf,
        line: usize,
        #[source]
        source: RecordError,
    },
}

impl LoadError {
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "PLAN_LOAD_IO",
            LoadError::Json { .. } => "PLAN_LOAD_JSON",
            LoadError::Record { .. } => "PLAN_LOAD_RECORD",
        }
    }

    /// 1-based line number of the offending line, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Io { .. } => None,
            LoadError::Json { line, .. } | LoadError::Record { line, .. } => Some(*line),
        }
    }
}

/// Errors raised while generating a synthetic dataset
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),

    #[error("timestamp out of range: {0}")]
    Timestamp(i64),
}

impl GenerateError {
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::Io { .. } => "PLAN_GENERATE_IO",
            GenerateError::Serialize(_) => "PLAN_GENERATE_SERIALIZE",
            GenerateError::InvalidSettings(_) => "PLAN_GENERATE_SETTINGS",
            GenerateError::Timestamp(_) => "PLAN_GENERATE_TIMESTAMP",
        }
    }
}
