use std::path::Path;

use feedback_ingest::{IngestError, read_structured_from_reader};
use feedback_model::RawValue;

fn read(contents: &str) -> Result<Vec<feedback_model::RawRecord>, IngestError> {
    read_structured_from_reader(contents.as_bytes(), Path::new("web.json")).map(Iterator::collect)
}

#[test]
fn reads_objects_in_order() {
    let records = read(
        r#"[
            {"customer_id": "C1", "rating": 6, "comments": "late", "review_date": "2024-01-01"},
            {"customer_id": 42, "rating": "4"}
        ]"#,
    )
    .expect("read json");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].position, 1);
    assert_eq!(records[0].get("rating"), Some(&RawValue::Integer(6)));
    assert_eq!(records[1].position, 2);
    assert_eq!(records[1].get("customer_id"), Some(&RawValue::Integer(42)));
    assert_eq!(records[1].get("rating"), Some(&RawValue::Text("4".to_string())));
    assert_eq!(records[1].get("review_date"), None);
}

#[test]
fn null_values_are_kept_as_null() {
    let records = read(r#"[{"customer_id": "C1", "rating": null}]"#).expect("read json");
    assert_eq!(records[0].get("rating"), Some(&RawValue::Null));
}

#[test]
fn non_object_items_become_malformed_records() {
    let records = read(r#"[{"customer_id": "C1", "rating": 5}, 17, "text"]"#).expect("read json");
    assert_eq!(records.len(), 3);
    assert!(records[0].malformed.is_none());
    assert_eq!(
        records[1].malformed.as_deref(),
        Some("expected a JSON object, found a number")
    );
    assert_eq!(records[2].position, 3);
}

#[test]
fn top_level_object_is_fatal() {
    let err = read(r#"{"customer_id": "C1"}"#).unwrap_err();
    assert!(matches!(err, IngestError::NotAList { found: "an object", .. }));
}

#[test]
fn invalid_json_is_fatal() {
    let err = read(r#"[{"customer_id": "C1",]"#).unwrap_err();
    assert!(matches!(err, IngestError::Json { .. }));
}
