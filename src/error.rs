use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal failures while ingesting a single input file
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {path} - {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{format} parse error: {path} - {details}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        details: String,
    },

    #[error("Schema error: {path} - {details}")]
    Schema { path: PathBuf, details: String },
}

impl IngestError {
    pub fn path(&self) -> &Path {
        match self {
            IngestError::Io { path, .. }
            | IngestError::Parse { path, .. }
            | IngestError::Schema { path, .. } => path.as_path(),
        }
    }
}

/// Why a single record was dropped. Always recovered inside the ingestor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("incorrect type for field '{field}': {reason}")]
    TypeMismatch { field: &'static str, reason: String },

    #[error("negative value for field '{field}'")]
    NegativeValue { field: &'static str },

    #[error("record is not an object: found {found}")]
    NotARecord { found: &'static str },
}

impl RecordError {
    /// The offending field, if the rejection is about a single field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RecordError::MissingField { field }
            | RecordError::TypeMismatch { field, .. }
            | RecordError::NegativeValue { field } => Some(*field),
            RecordError::NotARecord { .. } => None,
        }
    }
}

/// Top-level error surfaced by the command-line shell
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unsupported file type: {path} - only JSON and XML files are supported")]
    UnsupportedFormat { path: PathBuf },

    #[error("No employee data found in the input file: {path}")]
    NoRecords { path: PathBuf },
}

/// Result type alias for ingestion
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// Result type alias for record validation
pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Result type alias for the application shell
pub type Result<T> = std::result::Result<T, AppError>;
