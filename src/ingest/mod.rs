//! Format Ingestion
//!
//! One capability, two variants: read a file, locate the record collection,
//! run every raw record through the shared [`RecordValidator`] and keep the
//! survivors in source order. File-level failures abort with an
//! [`IngestError`]; record-level failures are logged and skipped.

pub mod json;
pub mod xml;

use std::path::Path;

use tracing::warn;

use crate::config::InputConfig;
use crate::employee::Employee;
use crate::error::{IngestError, IngestResult, RecordError, RecordResult};
use crate::validator::RecordValidator;

pub use json::{JsonIngestor, JsonLayout};
pub use xml::{XmlFieldStyle, XmlIngestor};

/// Reads one input file into validated employee records
pub trait Ingestor {
    /// Human-readable format name used in diagnostics
    fn format_name(&self) -> &'static str;

    fn ingest(&self, path: &Path) -> IngestResult<Ingested>;
}

/// A record dropped during ingestion
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Zero-based position among the source's records
    pub index: usize,
    pub error: RecordError,
}

/// Outcome of ingesting one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingested {
    /// Surviving records, in source order
    pub records: Vec<Employee>,
    pub rejections: Vec<Rejection>,
}

impl Ingested {
    /// Total number of raw records seen
    pub fn seen(&self) -> usize {
        self.records.len() + self.rejections.len()
    }

    pub(crate) fn accept(&mut self, path: &Path, index: usize, result: RecordResult<Employee>) {
        match result {
            Ok(employee) => self.records.push(employee),
            Err(error) => {
                warn!(
                    file = %path.display(),
                    index,
                    reason = %error,
                    "Skipping invalid employee record"
                );
                self.rejections.push(Rejection { index, error });
            }
        }
    }
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Xml,
}

impl InputFormat {
    /// Pick a format from the path. This is a substring match rather than a
    /// suffix check, so `staff.json.bak` still reads as JSON.
    pub fn detect(path: &Path) -> Option<Self> {
        let path = path.to_string_lossy();
        if path.contains(".json") {
            Some(InputFormat::Json)
        } else if path.contains(".xml") {
            Some(InputFormat::Xml)
        } else {
            None
        }
    }

    /// Build the ingestor for this format from the input configuration
    pub fn ingestor(self, config: &InputConfig) -> Box<dyn Ingestor> {
        let validator = RecordValidator::new(config.strictness);
        match self {
            InputFormat::Json => Box::new(JsonIngestor::new(
                config.json_layout,
                config.collection_key.clone(),
                validator,
            )),
            InputFormat::Xml => Box::new(XmlIngestor::new(
                config.xml_root.clone(),
                config.xml_record.clone(),
                config.xml_fields,
                validator,
            )),
        }
    }
}

pub(crate) fn read_source(path: &Path) -> IngestResult<String> {
    std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
