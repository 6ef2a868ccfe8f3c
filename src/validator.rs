//! Record Validation
//!
//! Decides whether one raw field-set is a well-formed employee record. Both
//! ingestors expose their source records through [`RecordFields`] and share a
//! single [`RecordValidator`], so JSON objects and XML elements are judged by
//! the same rules:
//!
//! 1. all four fields present
//! 2. text fields hold text, numeric fields convert to numbers
//! 3. `id` and `salary` are not negative (strict mode only)
//!
//! The first failing check wins.

use std::num::IntErrorKind;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::employee::Employee;
use crate::error::{RecordError, RecordResult};

pub const FIELD_NAME: &str = "name";
pub const FIELD_ID: &str = "id";
pub const FIELD_DEPARTMENT: &str = "department";
pub const FIELD_SALARY: &str = "salary";

/// Every field a record must carry, in check order
pub const REQUIRED_FIELDS: [&str; 4] = [FIELD_NAME, FIELD_ID, FIELD_DEPARTMENT, FIELD_SALARY];

/// How much the validator enforces beyond field presence and convertibility
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    /// Reject negative values; an empty result is a terminal error
    #[default]
    Strict,
    /// Accept negative values and numeric strings; an empty result is reported as-is
    Lenient,
}

/// A single raw field as exposed by the source format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// The field is not present at all
    Missing,
    /// Present but without a value (JSON `null`, empty XML element)
    Null,
    Text(&'a str),
    Integer(i64),
    /// A number that is not representable as `i64`
    Float(f64),
    /// Any other value kind, named for diagnostics
    Other(&'static str),
}

impl FieldValue<'_> {
    fn describe(&self) -> &'static str {
        match *self {
            FieldValue::Missing => "nothing",
            FieldValue::Null => "no value",
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) | FieldValue::Float(_) => "a number",
            FieldValue::Other(kind) => kind,
        }
    }
}

/// Accessor over one raw record's named fields
pub trait RecordFields {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

/// Turns raw field-sets into [`Employee`] values or a [`RecordError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator {
    strictness: Strictness,
    numeric_text: bool,
}

impl RecordValidator {
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            // Lenient mode parses numbers out of strings for every format
            numeric_text: strictness == Strictness::Lenient,
        }
    }

    /// Accept numeric fields given as text. Text-only formats such as XML
    /// need this regardless of strictness.
    pub fn with_numeric_text(mut self, enabled: bool) -> Self {
        self.numeric_text = self.numeric_text || enabled;
        self
    }

    pub fn validate<R>(&self, record: &R) -> RecordResult<Employee>
    where
        R: RecordFields + ?Sized,
    {
        let values = REQUIRED_FIELDS.map(|name| record.field(name));

        if let Some(position) = values
            .iter()
            .position(|value| matches!(value, FieldValue::Missing))
        {
            return Err(RecordError::MissingField {
                field: REQUIRED_FIELDS[position],
            });
        }

        let [name, id, department, salary] = values;
        let name = convert_text(FIELD_NAME, name, true)?;
        let id = convert_id(id, self.numeric_text)?;
        let department = convert_text(FIELD_DEPARTMENT, department, false)?;
        let salary = convert_salary(salary, self.numeric_text)?;

        if self.strictness == Strictness::Strict {
            if id < 0 {
                return Err(RecordError::NegativeValue { field: FIELD_ID });
            }
            if salary < 0.0 {
                return Err(RecordError::NegativeValue {
                    field: FIELD_SALARY,
                });
            }
        }

        Ok(Employee {
            name: name.to_string(),
            id,
            department: department.to_string(),
            salary,
        })
    }
}

fn type_mismatch(field: &'static str, reason: impl Into<String>) -> RecordError {
    RecordError::TypeMismatch {
        field,
        reason: reason.into(),
    }
}

fn convert_text<'a>(
    field: &'static str,
    value: FieldValue<'a>,
    require_non_empty: bool,
) -> RecordResult<&'a str> {
    match value {
        FieldValue::Text(text) if require_non_empty && text.is_empty() => {
            Err(type_mismatch(field, "must not be empty"))
        }
        FieldValue::Text(text) => Ok(text),
        FieldValue::Missing => Err(RecordError::MissingField { field }),
        other => Err(type_mismatch(
            field,
            format!("expected text, found {}", other.describe()),
        )),
    }
}

/// Convert an identifier field to `i64`
pub fn convert_id(value: FieldValue<'_>, numeric_text: bool) -> RecordResult<i64> {
    match value {
        FieldValue::Integer(id) => Ok(id),
        FieldValue::Float(_) => Err(type_mismatch(
            FIELD_ID,
            "expected a whole number within range",
        )),
        FieldValue::Text(text) if numeric_text => parse_integer(text),
        FieldValue::Missing => Err(RecordError::MissingField { field: FIELD_ID }),
        other => Err(type_mismatch(
            FIELD_ID,
            format!("expected an integer, found {}", other.describe()),
        )),
    }
}

/// Convert a salary field to a finite `f64`
pub fn convert_salary(value: FieldValue<'_>, numeric_text: bool) -> RecordResult<f64> {
    let salary = match value {
        FieldValue::Integer(salary) => salary as f64,
        FieldValue::Float(salary) => salary,
        FieldValue::Text(text) if numeric_text => text
            .parse::<f64>()
            .map_err(|_| type_mismatch(FIELD_SALARY, format!("'{}' is not a number", text)))?,
        FieldValue::Missing => {
            return Err(RecordError::MissingField {
                field: FIELD_SALARY,
            });
        }
        other => {
            return Err(type_mismatch(
                FIELD_SALARY,
                format!("expected a number, found {}", other.describe()),
            ));
        }
    };

    if salary.is_finite() {
        Ok(salary)
    } else {
        Err(type_mismatch(FIELD_SALARY, "value out of range"))
    }
}

/// A bare digit run with an optional leading `-`
fn parse_integer(text: &str) -> RecordResult<i64> {
    if text.starts_with('+') {
        return Err(type_mismatch(FIELD_ID, format!("'{}' is not an integer", text)));
    }
    text.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            type_mismatch(FIELD_ID, format!("'{}' is out of range", text))
        }
        _ => type_mismatch(FIELD_ID, format!("'{}' is not an integer", text)),
    })
}
