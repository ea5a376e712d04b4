use super::*;
use crate::record::Field;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn record_with_zip(name: &str, zip: Option<&str>) -> AddressRecord {
    let record = AddressRecord::new().with(Field::Name, name);
    match zip {
        Some(zip) => record.with(Field::Zip, zip),
        None => record,
    }
}

fn names(records: &[AddressRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.get(Field::Name).unwrap())
        .collect()
}

const PEOPLE_XML: &str = r#"<people>
  <person>
    <name>Ann Lee</name>
    <address>
      <street>1 Sunset Blvd</street>
      <city>Beverly Hills</city>
      <county>Los Angeles</county>
      <state>CA</state>
      <zip>90210</zip>
    </address>
  </person>
  <person>
    <name>Bo Park</name>
    <address>
      <street>350 5th Ave</street>
      <city>New York</city>
      <county>New York</county>
      <state>NY</state>
      <zip>10001</zip>
    </address>
  </person>
</people>"#;

// ========================================================================
// Sorting Tests
// ========================================================================

#[test]
fn test_sort_by_zip_ascending() {
    let mut records = vec![
        record_with_zip("c", Some("90210")),
        record_with_zip("a", Some("00501")),
        record_with_zip("b", Some("10001")),
    ];
    sort_by_zip(&mut records);

    assert_eq!(names(&records), vec!["a", "b", "c"]);
}

#[test]
fn test_sort_missing_zip_first() {
    let mut records = vec![
        record_with_zip("with", Some("00001")),
        record_with_zip("without", None),
    ];
    sort_by_zip(&mut records);

    assert_eq!(names(&records), vec!["without", "with"]);
}

#[test]
fn test_sort_is_stable() {
    let mut records = vec![
        record_with_zip("first", Some("10001")),
        record_with_zip("none-1", None),
        record_with_zip("second", Some("10001")),
        record_with_zip("empty", Some("")),
        record_with_zip("none-2", None),
        record_with_zip("third", Some("10001")),
    ];
    sort_by_zip(&mut records);

    assert_eq!(
        names(&records),
        vec!["none-1", "empty", "none-2", "first", "second", "third"]
    );
}

#[test]
fn test_sort_compares_strings_not_numbers() {
    let mut records = vec![
        record_with_zip("long", Some("100")),
        record_with_zip("short", Some("99")),
    ];
    sort_by_zip(&mut records);

    assert_eq!(names(&records), vec!["long", "short"]);
}

// ========================================================================
// Ingestor Tests
// ========================================================================

#[test]
fn test_ingest_xml_and_tsv_sorted() {
    let dir = TempDir::new().unwrap();
    let xml = write(&dir, "people.xml", PEOPLE_XML);
    let tsv = write(
        &dir,
        "people.tsv",
        "Cy Diaz\tGlobex\t3 Oak St\tHoltsville\tNY\t00501\n",
    );

    let aggregate = Ingestor::default().ingest_all([&xml, &tsv]);

    assert!(aggregate.diagnostics.is_empty());
    let zips: Vec<_> = aggregate.records.iter().map(|r| r.zip_key()).collect();
    assert_eq!(zips, vec!["00501", "10001", "90210"]);
}

#[test]
fn test_ingest_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "people.csv", "a,b,c\n");

    let aggregate = Ingestor::default().ingest_all([&csv]);

    assert!(aggregate.is_empty());
    assert_eq!(
        aggregate.diagnostics[0].to_string(),
        format!("Error: Unsupported file format .csv for file {}", csv)
    );
}

#[test]
fn test_ingest_missing_file_reports_format() {
    let aggregate = Ingestor::default().ingest_all(["/nonexistent/people.tsv"]);

    assert!(aggregate.is_empty());
    assert_eq!(aggregate.diagnostics.len(), 1);
    assert!(aggregate.diagnostics[0]
        .to_string()
        .starts_with("Error parsing TSV file /nonexistent/people.tsv: "));
}

#[test]
fn test_ingest_unsupported_file_is_not_opened() {
    let aggregate = Ingestor::default().ingest_all(["/nonexistent/people.csv"]);

    assert!(matches!(
        aggregate.diagnostics[0],
        Diagnostic::UnsupportedFormat { .. }
    ));
}

#[test]
fn test_ingest_continues_after_failed_file() {
    let dir = TempDir::new().unwrap();
    let broken = write(&dir, "broken.xml", "<people><person>");
    let txt = write(
        &dir,
        "people.txt",
        "HEADER\n\nAnn Lee\n1 Main St\nSpringfield IL 62704 Sangamon\n",
    );

    let aggregate = Ingestor::default().ingest_all([&broken, &txt]);

    assert_eq!(aggregate.records.len(), 1);
    assert_eq!(aggregate.records[0].get(Field::County), Some("Sangamon"));
    assert_eq!(aggregate.diagnostics.len(), 1);
}

#[test]
fn test_ingest_keeps_duplicates_in_input_order() {
    let dir = TempDir::new().unwrap();
    let line = "Ann Lee\tAcme\t1 Main St\tSpringfield\tIL\t62704\n";
    let first = write(&dir, "first.tsv", line);
    let second = write(&dir, "second.tsv", line);

    let aggregate = Ingestor::default().ingest_all([&first, &second, &first]);

    assert_eq!(aggregate.records.len(), 3);
    assert!(aggregate.records.iter().all(|r| r == &aggregate.records[0]));
}

#[test]
fn test_ingest_respects_max_file_size() {
    let dir = TempDir::new().unwrap();
    let tsv = write(
        &dir,
        "people.tsv",
        "Ann Lee\tAcme\t1 Main St\tSpringfield\tIL\t62704\n",
    );

    let ingestor = Ingestor::new(
        ParserRegistry::standard(),
        IngestConfig::new().max_file_size(10),
    );
    let aggregate = ingestor.ingest_all([&tsv]);

    assert!(aggregate.is_empty());
    assert!(aggregate.diagnostics[0]
        .to_string()
        .contains("File too large"));
}

#[test]
fn test_ingest_empty_input_list() {
    let paths: Vec<String> = Vec::new();
    let aggregate = Ingestor::default().ingest_all(paths);

    assert!(aggregate.is_empty());
    assert!(aggregate.diagnostics.is_empty());
}

#[test]
fn test_ingest_directory_is_file_level_fault() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("folder.txt");
    fs::create_dir(&sub).unwrap();
    let path = sub.to_string_lossy().into_owned();

    let aggregate = Ingestor::default().ingest_all([&path]);

    assert!(aggregate.is_empty());
    assert!(matches!(
        aggregate.diagnostics[0],
        Diagnostic::FileFailed { format: "TXT", .. }
    ));
}
