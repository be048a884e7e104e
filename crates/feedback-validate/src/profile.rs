//! Per-source validation rules.
//!
//! The three sources disagree on which fields are required, how a missing
//! rating is treated and which date order they use. Each source maps to one
//! static [`ValidationProfile`]; the normalizer reads the profile instead of
//! branching on the source.

use feedback_model::Source;

use crate::dates::DateFormat;

/// How a rating that is absent or blank is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingWhenAbsent {
    /// Reject as a missing required field. Unparseable text counts as absent.
    Reject,
    /// Substitute this value; the range check then rejects it.
    Sentinel(i64),
}

/// Validation rules for one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationProfile {
    pub source: Source,
    /// Rejection reason for a missing customer id or rating.
    pub missing_reason: &'static str,
    pub rating_when_absent: RatingWhenAbsent,
    pub date_format: DateFormat,
    pub date_required: bool,
    /// Store accepted dates as ISO `YYYY-MM-DD`; otherwise keep the input text.
    pub store_iso: bool,
}

pub const TABULAR_PROFILE: ValidationProfile = ValidationProfile {
    source: Source::Tabular,
    missing_reason: "Missing required field(s)",
    rating_when_absent: RatingWhenAbsent::Reject,
    date_format: DateFormat::DayMonthYear,
    date_required: true,
    store_iso: true,
};

pub const STRUCTURED_PROFILE: ValidationProfile = ValidationProfile {
    source: Source::Structured,
    missing_reason: "Missing customer_id or rating",
    rating_when_absent: RatingWhenAbsent::Sentinel(0),
    date_format: DateFormat::YearMonthDay,
    date_required: false,
    store_iso: false,
};

pub const MARKUP_TREE_PROFILE: ValidationProfile = ValidationProfile {
    source: Source::MarkupTree,
    missing_reason: "Missing customer_id or rating",
    rating_when_absent: RatingWhenAbsent::Sentinel(0),
    date_format: DateFormat::YearMonthDay,
    date_required: false,
    store_iso: false,
};

impl ValidationProfile {
    pub fn for_source(source: Source) -> &'static ValidationProfile {
        match source {
            Source::Tabular => &TABULAR_PROFILE,
            Source::Structured => &STRUCTURED_PROFILE,
            Source::MarkupTree => &MARKUP_TREE_PROFILE,
        }
    }
}
