use divan::Bencher;
use employee_report::{
    Employee, Ingestor, JsonIngestor, JsonLayout, RecordValidator, XmlFieldStyle, XmlIngestor,
    highest_paid, mean_salary, sort_by_id,
};
use std::fmt::Write;
use tempfile::TempDir;

fn main() {
    divan::main();
}

const RECORDS: usize = 10_000;

fn roster() -> Vec<Employee> {
    (0..RECORDS)
        .map(|i| {
            Employee::new(
                format!("Employee {i}"),
                ((i * 7919) % RECORDS) as i64,
                "Eng",
                (i % 97) as f64 * 1000.0,
            )
        })
        .collect()
}

fn json_document() -> String {
    let entries: Vec<String> = roster()
        .iter()
        .map(|e| {
            format!(
                r#"{{"name":"{}","id":{},"department":"{}","salary":{}}}"#,
                e.name, e.id, e.department, e.salary
            )
        })
        .collect();
    format!(r#"{{"employees":[{}]}}"#, entries.join(","))
}

fn xml_document() -> String {
    let mut document = String::from("<employees>");
    for e in roster() {
        let _ = write!(
            document,
            r#"<employee name="{}" id="{}" department="{}" salary="{}"/>"#,
            e.name, e.id, e.department, e.salary
        );
    }
    document.push_str("</employees>");
    document
}

#[divan::bench]
fn ingest_json(bencher: Bencher) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("staff.json");
    std::fs::write(&path, json_document()).unwrap();
    let ingestor = JsonIngestor::new(JsonLayout::Envelope, "employees", RecordValidator::default());

    bencher.bench_local(|| ingestor.ingest(divan::black_box(&path)).unwrap());
}

#[divan::bench]
fn ingest_xml(bencher: Bencher) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("staff.xml");
    std::fs::write(&path, xml_document()).unwrap();
    let ingestor = XmlIngestor::new(
        "employees",
        "employee",
        XmlFieldStyle::Attributes,
        RecordValidator::default(),
    );

    bencher.bench_local(|| ingestor.ingest(divan::black_box(&path)).unwrap());
}

#[divan::bench]
fn aggregate(bencher: Bencher) {
    let records = roster();

    bencher.bench_local(|| {
        let records = divan::black_box(&records);
        (mean_salary(records), highest_paid(records), sort_by_id(records))
    });
}
