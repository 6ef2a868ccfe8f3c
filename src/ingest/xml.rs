use std::path::Path;

use clap::ValueEnum;
use roxmltree::{Document, Node, ParsingOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IngestError, IngestResult};
use crate::ingest::{Ingested, Ingestor, read_source};
use crate::validator::{FieldValue, RecordFields, RecordValidator};

/// How a record element exposes its fields
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum XmlFieldStyle {
    /// `<employee><name>Ann</name>...</employee>`
    #[default]
    Elements,
    /// `<employee name="Ann" .../>`
    Attributes,
    /// Child element first, attribute as fallback
    Either,
}

/// Ingests employee records from an XML document
#[derive(Debug, Clone)]
pub struct XmlIngestor {
    root: String,
    record: String,
    fields: XmlFieldStyle,
    validator: RecordValidator,
}

impl XmlIngestor {
    pub fn new(
        root: impl Into<String>,
        record: impl Into<String>,
        fields: XmlFieldStyle,
        validator: RecordValidator,
    ) -> Self {
        Self {
            root: root.into(),
            record: record.into(),
            fields,
            // XML carries every value as text
            validator: validator.with_numeric_text(true),
        }
    }
}

impl Ingestor for XmlIngestor {
    fn format_name(&self) -> &'static str {
        "XML"
    }

    fn ingest(&self, path: &Path) -> IngestResult<Ingested> {
        let content = read_source(path)?;
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document =
            Document::parse_with_options(&content, options).map_err(|e| IngestError::Parse {
                path: path.to_path_buf(),
                format: self.format_name(),
                details: e.to_string(),
            })?;

        let root = document.root_element();
        if root.tag_name().name() != self.root {
            return Err(IngestError::Schema {
                path: path.to_path_buf(),
                details: format!(
                    "expected root element <{}>, found <{}>",
                    self.root,
                    root.tag_name().name()
                ),
            });
        }

        let mut ingested = Ingested::default();
        let records = root
            .children()
            .filter(|node| node.is_element() && node.tag_name().name() == self.record);
        for (index, element) in records.enumerate() {
            let view = XmlRecord {
                element,
                style: self.fields,
            };
            ingested.accept(path, index, self.validator.validate(&view));
        }
        debug!(
            file = %path.display(),
            seen = ingested.seen(),
            "Walked XML record elements"
        );

        Ok(ingested)
    }
}

/// Field view over one record element
struct XmlRecord<'a, 'input> {
    element: Node<'a, 'input>,
    style: XmlFieldStyle,
}

impl<'a> XmlRecord<'a, '_> {
    fn child_text(&self, name: &str) -> Option<Option<&'a str>> {
        self.element
            .children()
            .find(|node| node.is_element() && node.tag_name().name() == name)
            .map(|child| child.text())
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element.attribute(name)
    }
}

impl RecordFields for XmlRecord<'_, '_> {
    fn field(&self, name: &str) -> FieldValue<'_> {
        let raw = match self.style {
            XmlFieldStyle::Elements => self.child_text(name),
            XmlFieldStyle::Attributes => self.attribute(name).map(Some),
            XmlFieldStyle::Either => self
                .child_text(name)
                .or_else(|| self.attribute(name).map(Some)),
        };

        match raw {
            None => FieldValue::Missing,
            Some(text) => match text.map(str::trim) {
                Some(text) if !text.is_empty() => FieldValue::Text(text),
                _ => FieldValue::Null,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::Employee;
    use crate::error::RecordError;
    use std::fs;
    use tempfile::TempDir;

    fn write_xml(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("employees.xml");
        fs::write(&path, content).unwrap();
        path
    }

    fn ingestor(fields: XmlFieldStyle) -> XmlIngestor {
        XmlIngestor::new("employees", "employee", fields, RecordValidator::default())
    }

    #[test]
    fn test_element_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_xml(
            &dir,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<employees>
    <employee>
        <name>Ann</name>
        <id>2</id>
        <department>Eng</department>
        <salary>90000</salary>
    </employee>
    <employee>
        <name> Bo </name>
        <id>1</id>
        <department>Ops</department>
        <salary>85000.25</salary>
    </employee>
</employees>"#,
        );

        let ingested = ingestor(XmlFieldStyle::Elements).ingest(&path).unwrap();
        assert_eq!(
            ingested.records,
            vec![
                Employee::new("Ann", 2, "Eng", 90000.0),
                Employee::new("Bo", 1, "Ops", 85000.25),
            ]
        );
    }

    #[test]
    fn test_doctype_declaration_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_xml(
            &dir,
            r#"<?xml version="1.0"?>
<!DOCTYPE employees>
<employees>
    <employee><name>Ann</name><id>2</id><department>Eng</department><salary>90000</salary></employee>
</employees>"#,
        );

        let ingested = ingestor(XmlFieldStyle::Elements).ingest(&path).unwrap();
        assert_eq!(ingested.records, vec![Employee::new("Ann", 2, "Eng", 90000.0)]);
    }

    #[test]
    fn test_attribute_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_xml(
            &dir,
            r#"<employees><employee name="Cy" id="5" department="HR" salary="50000"/></employees>"#,
        );

        let ingested = ingestor(XmlFieldStyle::Attributes).ingest(&path).unwrap();
        assert_eq!(ingested.records, vec![Employee::new("Cy", 5, "HR", 50000.0)]);

        // Attributes are invisible to the element convention
        let ingested = ingestor(XmlFieldStyle::Elements).ingest(&path).unwrap();
        assert!(ingested.records.is_empty());
        assert_eq!(
            ingested.rejections[0].error,
            RecordError::MissingField { field: "name" }
        );
    }

    #[test]
    fn test_either_prefers_elements() {
        let dir = TempDir::new().unwrap();
        let path = write_xml(
            &dir,
            r#"<employees>
    <employee id="7" salary="1000"><name>Di</name><department>Ops</department><salary>2000</salary></employee>
</employees>"#,
        );

        let ingested = ingestor(XmlFieldStyle::Either).ingest(&path).unwrap();
        assert_eq!(ingested.records, vec![Employee::new("Di", 7, "Ops", 2000.0)]);
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_xml(
            &dir,
            r#"<employees>
    <employee><name>NoDept</name><id>1</id><salary>1</salary></employee>
    <employee><name></name><id>2</id><department>Eng</department><salary>1</salary></employee>
    <employee><name>Frac</name><id>3.0</id><department>Eng</department><salary>1</salary></employee>
    <employee><name>Words</name><id>4</id><department>Eng</department><salary>lots</salary></employee>
    <employee><name>Neg</name><id>5</id><department>Eng</department><salary>-1</salary></employee>
    <employee><name>Huge</name><id>99999999999999999999</id><department>Eng</department><salary>1</salary></employee>
    <employee><name>Ok</name><id>7</id><department>Eng</department><salary>3</salary></employee>
</employees>"#,
        );

        let ingested = ingestor(XmlFieldStyle::Elements).ingest(&path).unwrap();
        assert_eq!(ingested.records, vec![Employee::new("Ok", 7, "Eng", 3.0)]);

        let errors: Vec<&RecordError> = ingested.rejections.iter().map(|r| &r.error).collect();
        assert_eq!(
            errors[0],
            &RecordError::MissingField {
                field: "department"
            }
        );
        assert!(matches!(errors[1], RecordError::TypeMismatch { field: "name", .. }));
        assert!(matches!(errors[2], RecordError::TypeMismatch { field: "id", .. }));
        assert!(matches!(errors[3], RecordError::TypeMismatch { field: "salary", .. }));
        assert_eq!(errors[4], &RecordError::NegativeValue { field: "salary" });
        assert!(errors[5].to_string().contains("out of range"));
    }

    #[test]
    fn test_other_children_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_xml(
            &dir,
            r#"<employees>
    <!-- exported nightly -->
    <manager><name>Zed</name><id>0</id><department>Board</department><salary>1</salary></manager>
    <employee><name>Ann</name><id>2</id><department>Eng</department><salary>1</salary></employee>
</employees>"#,
        );

        let ingested = ingestor(XmlFieldStyle::Elements).ingest(&path).unwrap();
        assert_eq!(ingested.records.len(), 1);
        assert_eq!(ingested.seen(), 1);
    }

    #[test]
    fn test_wrong_root_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write_xml(&dir, r#"<staff><employee/></staff>"#);

        let err = ingestor(XmlFieldStyle::Elements).ingest(&path).unwrap_err();
        assert!(matches!(err, IngestError::Schema { .. }));
        assert!(err.to_string().contains("<employees>"));
    }

    #[test]
    fn test_malformed_markup_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_xml(&dir, r#"<employees><employee></employees>"#);

        let err = ingestor(XmlFieldStyle::Elements).ingest(&path).unwrap_err();
        assert!(matches!(err, IngestError::Parse { format: "XML", .. }));
    }

    #[test]
    fn test_empty_container() {
        let dir = TempDir::new().unwrap();
        let path = write_xml(&dir, r#"<employees/>"#);

        let ingested = ingestor(XmlFieldStyle::Elements).ingest(&path).unwrap();
        assert!(ingested.records.is_empty());
    }
}
