#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Envelope document from the reference example: two records tied at the
/// top salary, listed out of id order.
pub const TIED_ENVELOPE_JSON: &str = r#"{"employees":[{"name":"Ann","id":2,"department":"Eng","salary":90000},{"name":"Bo","id":1,"department":"Ops","salary":90000}]}"#;

/// A lone record without a department
pub const MISSING_DEPARTMENT_JSON: &str =
    r#"{"employees":[{"name":"Ann","id":2,"salary":90000}]}"#;

/// Attribute-style XML with a single record
pub const ATTRIBUTE_XML: &str =
    r#"<employees><employee name="Cy" id="5" department="HR" salary="50000"/></employees>"#;

/// Element-style XML mixing valid and invalid records
pub const MIXED_ELEMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<employees>
    <employee>
        <name>Eve</name>
        <id>30</id>
        <department>Finance</department>
        <salary>72000.50</salary>
    </employee>
    <employee>
        <name>Broken</name>
        <id>abc</id>
        <department>Finance</department>
        <salary>1</salary>
    </employee>
    <employee>
        <name>Gus</name>
        <id>10</id>
        <department>Ops</department>
        <salary>58000</salary>
    </employee>
    <employee>
        <name>Neg</name>
        <id>11</id>
        <department>Ops</department>
        <salary>-5</salary>
    </employee>
</employees>"#;

/// Temporary directory holding input files for one test
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }
}
