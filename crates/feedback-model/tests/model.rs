//! Tests for feedback-model types.

use feedback_model::{CUSTOMER_ID, RATING, RawRecord, RawValue, Source};

#[test]
fn source_identities_are_fixed() {
    assert_eq!(Source::Tabular.log_tag(), "CSV");
    assert_eq!(Source::Structured.log_tag(), "JSON");
    assert_eq!(Source::MarkupTree.log_tag(), "XML");
    assert_eq!(Source::Tabular.table_name(), "survey_staging");
    assert_eq!(Source::Structured.table_name(), "web_staging");
    assert_eq!(Source::MarkupTree.table_name(), "external_staging");
}

#[test]
fn source_parses_tags_and_tables() {
    assert_eq!("csv".parse::<Source>().unwrap(), Source::Tabular);
    assert_eq!("WEB_STAGING".parse::<Source>().unwrap(), Source::Structured);
    assert_eq!("markup-tree".parse::<Source>().unwrap(), Source::MarkupTree);
    assert!("yaml".parse::<Source>().is_err());
}

#[test]
fn source_rank_round_trips() {
    for source in Source::ALL {
        assert_eq!(Source::from_rank(source.rank()), Some(source));
    }
    assert_eq!(Source::from_rank(0), None);
}

#[test]
fn raw_record_text_skips_blank_values() {
    let record = RawRecord::new(1)
        .with_field(CUSTOMER_ID, "  ")
        .with_field(RATING, 4);
    assert_eq!(record.text(CUSTOMER_ID), None);
    assert_eq!(record.text(RATING), Some("4".to_string()));
    assert_eq!(record.text("comments"), None);
}

#[test]
fn raw_value_blankness() {
    assert!(RawValue::Null.is_blank());
    assert!(RawValue::from(" ").is_blank());
    assert!(!RawValue::Integer(0).is_blank());
    assert_eq!(RawValue::Bool(true).as_text(), None);
}

#[test]
fn malformed_record_has_no_fields() {
    let record = RawRecord::malformed(3, "expected an object");
    assert_eq!(record.position, 3);
    assert!(record.fields.is_empty());
    assert_eq!(record.malformed.as_deref(), Some("expected an object"));
}
