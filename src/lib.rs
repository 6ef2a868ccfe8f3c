//! # employee-report Library
//!
//! Ingests employee records from JSON or XML, validates each record, and
//! derives the mean salary, the highest-paid employee and the roster sorted
//! by identifier.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod employee;
pub mod error;
pub mod error_reporter;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod validator;

pub use aggregate::{Summary, highest_paid, mean_salary, sort_by_id};
pub use cli::{Cli, VerbosityLevel};
pub use config::{Config, ConfigError, ConfigManager, InputConfig, OutputConfig};
pub use employee::Employee;
pub use error::{AppError, IngestError, RecordError};
pub use error_reporter::ErrorReporter;
pub use ingest::{
    InputFormat, Ingested, Ingestor, JsonIngestor, JsonLayout, Rejection, XmlFieldStyle,
    XmlIngestor,
};
pub use output::{IngestCounts, Output, ReportFormat};
pub use pipeline::{Report, run};
pub use validator::{FieldValue, RecordFields, RecordValidator, Strictness};
