//! Shared types for the customer feedback pipeline.

pub mod error;
pub mod record;
pub mod rejection;
pub mod source;

pub use error::{ModelError, Result};
pub use record::{
    COMMENTS, CUSTOMER_ID, NormalizedRecord, RATING, REVIEW_DATE, RawRecord, RawValue,
    StagedRecord,
};
pub use rejection::RejectionEntry;
pub use source::Source;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_log_line_format() {
        let entry = RejectionEntry::new(Source::Structured, 4, "Invalid rating 6");
        assert_eq!(entry.log_line(), "[JSON] Record 4: Invalid rating 6");
    }

    #[test]
    fn staged_record_serializes_flat() {
        let staged = StagedRecord {
            source: Source::MarkupTree,
            sequence_id: 1,
            record: NormalizedRecord {
                customer_id: "C1".to_string(),
                rating: 4,
                comments: String::new(),
                review_date: "2024-01-01".to_string(),
            },
        };
        let json = serde_json::to_value(&staged).expect("serialize staged record");
        assert_eq!(json["source"], "markup_tree");
        assert_eq!(json["customer_id"], "C1");
        assert_eq!(json["rating"], 4);
    }
}
