use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{IngestError, IngestResult, RecordError};
use crate::ingest::{Ingested, Ingestor, read_source};
use crate::validator::{FieldValue, RecordFields, RecordValidator};

/// Where the record array sits in a JSON document
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum JsonLayout {
    /// `{"employees": [...]}`
    #[default]
    Envelope,
    /// `[...]` at the top level
    BareArray,
}

/// Ingests employee records from a JSON document
#[derive(Debug, Clone)]
pub struct JsonIngestor {
    layout: JsonLayout,
    collection_key: String,
    validator: RecordValidator,
}

impl JsonIngestor {
    pub fn new(
        layout: JsonLayout,
        collection_key: impl Into<String>,
        validator: RecordValidator,
    ) -> Self {
        Self {
            layout,
            collection_key: collection_key.into(),
            validator,
        }
    }

    fn locate_records<'v>(&self, document: &'v Value) -> Result<&'v [Value], String> {
        match (self.layout, document) {
            (JsonLayout::BareArray, Value::Array(entries)) => Ok(entries.as_slice()),
            (JsonLayout::BareArray, other) => Err(format!(
                "expected a top-level array, found {}",
                kind_of(other)
            )),
            (JsonLayout::Envelope, Value::Object(members)) => {
                match members.get(&self.collection_key) {
                    Some(Value::Array(entries)) => Ok(entries.as_slice()),
                    Some(other) => Err(format!(
                        "field '{}' must be an array, found {}",
                        self.collection_key,
                        kind_of(other)
                    )),
                    None => Err(format!("missing array field '{}'", self.collection_key)),
                }
            }
            (JsonLayout::Envelope, other) => Err(format!(
                "expected an object with an array field '{}', found {}",
                self.collection_key,
                kind_of(other)
            )),
        }
    }
}

impl Ingestor for JsonIngestor {
    fn format_name(&self) -> &'static str {
        "JSON"
    }

    fn ingest(&self, path: &Path) -> IngestResult<Ingested> {
        let content = read_source(path)?;
        let document: Value = serde_json::from_str(&content).map_err(|e| IngestError::Parse {
            path: path.to_path_buf(),
            format: self.format_name(),
            details: e.to_string(),
        })?;

        let entries = self
            .locate_records(&document)
            .map_err(|details| IngestError::Schema {
                path: path.to_path_buf(),
                details,
            })?;
        debug!(file = %path.display(), entries = entries.len(), "Located JSON record array");

        let mut ingested = Ingested::default();
        for (index, entry) in entries.iter().enumerate() {
            let result = match entry {
                Value::Object(members) => self.validator.validate(&JsonRecord(members)),
                other => Err(RecordError::NotARecord {
                    found: kind_of(other),
                }),
            };
            ingested.accept(path, index, result);
        }

        Ok(ingested)
    }
}

/// Field view over one JSON object
struct JsonRecord<'a>(&'a Map<String, Value>);

impl RecordFields for JsonRecord<'_> {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match self.0.get(name) {
            None => FieldValue::Missing,
            Some(Value::Null) => FieldValue::Null,
            Some(Value::String(text)) => FieldValue::Text(text),
            Some(Value::Number(number)) => match number.as_i64() {
                Some(integer) => FieldValue::Integer(integer),
                None => FieldValue::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            Some(other) => FieldValue::Other(kind_of(other)),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
