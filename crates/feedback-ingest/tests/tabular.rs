use std::fs;
use std::path::Path;

use feedback_ingest::{IngestError, read_source, read_tabular, read_tabular_from_reader};
use feedback_model::{RawValue, Source};

#[test]
fn reads_rows_keyed_by_header() {
    let contents = "customer_id,rating,comments,review_date\n\
                    C1,4,fine,01-01-2024\n\
                    C2,5,\"late, but ok\",02-01-2024\n";
    let records: Vec<_> = read_tabular_from_reader(contents.as_bytes(), Path::new("survey.csv"))
        .expect("read csv")
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].position, 1);
    assert_eq!(records[0].text("customer_id").as_deref(), Some("C1"));
    assert_eq!(records[1].position, 2);
    assert_eq!(records[1].text("comments").as_deref(), Some("late, but ok"));
    assert_eq!(records[1].text("review_date").as_deref(), Some("02-01-2024"));
}

#[test]
fn short_rows_leave_fields_absent() {
    let contents = "customer_id,rating,comments,review_date\nC1,4\n";
    let mut records = read_tabular_from_reader(contents.as_bytes(), Path::new("survey.csv"))
        .expect("read csv");
    let record = records.next().expect("one record");
    assert_eq!(record.get("rating"), Some(&RawValue::Text("4".to_string())));
    assert_eq!(record.get("comments"), None);
    assert_eq!(record.get("review_date"), None);
}

#[test]
fn empty_lines_do_not_consume_positions() {
    let contents = "customer_id,rating,comments,review_date\n\
                    C1,4,a,01-01-2024\n\
                    \n\
                    ,,,\n\
                    C3,2,c,03-01-2024\n";
    let records: Vec<_> = read_tabular_from_reader(contents.as_bytes(), Path::new("survey.csv"))
        .expect("read csv")
        .collect();
    let positions: Vec<usize> = records.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert_eq!(records[1].text("customer_id"), None);
    assert_eq!(records[2].text("customer_id").as_deref(), Some("C3"));
}

#[test]
fn header_only_file_yields_no_records() {
    let records = read_tabular_from_reader(
        "customer_id,rating,comments,review_date\n".as_bytes(),
        Path::new("survey.csv"),
    )
    .expect("read csv");
    assert_eq!(records.len(), 0);
}

#[test]
fn reads_from_disk_and_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("customer_survey.csv");
    fs::write(
        &path,
        "\u{feff}customer_id,rating,comments,review_date\nC9,3,ok,10-10-2023\n",
    )
    .expect("write csv");

    let records = read_source(Source::Tabular, &path).expect("read csv");
    assert_eq!(records.source(), Source::Tabular);
    let records: Vec<_> = records.collect();
    assert_eq!(records[0].text("customer_id").as_deref(), Some("C9"));

    let missing = read_tabular(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(missing, IngestError::FileNotFound { .. }));
}
