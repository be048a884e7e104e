//! Record normalization.
//!
//! [`normalize`] turns one raw record into exactly one [`Outcome`]. Rules run
//! in a fixed order and the first failure decides the rejection reason:
//!
//! 1. the item must be a field mapping
//! 2. `customer_id` must be present and non-blank
//! 3. `rating` must be present and an integer (see [`RatingWhenAbsent`])
//! 4. `rating` must be within 1..=5
//! 5. `review_date` must match the source's date order, when present or required
//!
//! `comments` never rejects; it defaults to the empty string.

use feedback_model::{
    COMMENTS, CUSTOMER_ID, NormalizedRecord, RATING, REVIEW_DATE, RawRecord, RawValue,
    RejectionEntry, Source,
};
use thiserror::Error;
use tracing::trace;

use crate::dates::{parse_review_date, to_iso_date};
use crate::profile::{RatingWhenAbsent, ValidationProfile};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Why a record was rejected. The display text is what lands in the error log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("{0}")]
    Malformed(String),
    #[error("{0}")]
    MissingRequired(&'static str),
    #[error("Rating '{0}' is not an integer")]
    RatingNotInteger(String),
    #[error("Invalid rating {0}")]
    RatingOutOfRange(i64),
    #[error("Missing review_date")]
    MissingDate,
    #[error("Invalid date {0}")]
    InvalidDate(String),
}

/// Result of normalizing one raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(NormalizedRecord),
    Rejected(RejectionEntry),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn accepted(self) -> Option<NormalizedRecord> {
        match self {
            Outcome::Accepted(record) => Some(record),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn rejected(self) -> Option<RejectionEntry> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(entry) => Some(entry),
        }
    }
}

/// Validate and normalize one record from `source`.
pub fn normalize(raw: &RawRecord, source: Source) -> Outcome {
    let profile = ValidationProfile::for_source(source);
    match validate(raw, profile) {
        Ok(record) => {
            trace!(source = %source, position = raw.position, "record accepted");
            Outcome::Accepted(record)
        }
        Err(reason) => {
            trace!(source = %source, position = raw.position, %reason, "record rejected");
            Outcome::Rejected(RejectionEntry::new(source, raw.position, reason.to_string()))
        }
    }
}

/// Apply `profile`'s rules to `raw`.
pub fn validate(
    raw: &RawRecord,
    profile: &ValidationProfile,
) -> Result<NormalizedRecord, RejectReason> {
    if let Some(fault) = &raw.malformed {
        return Err(RejectReason::Malformed(fault.clone()));
    }

    let customer_id = raw
        .text(CUSTOMER_ID)
        .ok_or(RejectReason::MissingRequired(profile.missing_reason))?;

    let rating = resolve_rating(raw.get(RATING), profile)?;
    if rating == 0 {
        return Err(RejectReason::MissingRequired(profile.missing_reason));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(RejectReason::RatingOutOfRange(rating));
    }

    let review_date = resolve_date(raw.get(REVIEW_DATE), profile)?;

    let comments = match raw.get(COMMENTS) {
        None | Some(RawValue::Null) => String::new(),
        Some(value) => value.to_string(),
    };

    Ok(NormalizedRecord {
        customer_id,
        rating,
        comments,
        review_date,
    })
}

fn resolve_rating(
    value: Option<&RawValue>,
    profile: &ValidationProfile,
) -> Result<i64, RejectReason> {
    let missing = RejectReason::MissingRequired(profile.missing_reason);
    match profile.rating_when_absent {
        RatingWhenAbsent::Reject => value
            .and_then(RawValue::as_text)
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or(missing),
        RatingWhenAbsent::Sentinel(sentinel) => match value {
            None => Ok(sentinel),
            Some(value) if value.is_blank() => Ok(sentinel),
            Some(RawValue::Integer(rating)) => Ok(*rating),
            Some(RawValue::Float(rating)) => truncate(*rating)
                .ok_or_else(|| RejectReason::RatingNotInteger(rating.to_string())),
            Some(RawValue::Text(text)) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| RejectReason::RatingNotInteger(single_line(text.trim()))),
            Some(other) => Err(RejectReason::RatingNotInteger(single_line(&other.to_string()))),
        },
    }
}

/// Integer cast of a JSON float: truncates toward zero.
fn truncate(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

fn resolve_date(
    value: Option<&RawValue>,
    profile: &ValidationProfile,
) -> Result<String, RejectReason> {
    let text = match value {
        Some(value) if !value.is_blank() => value.to_string(),
        _ if profile.date_required => return Err(RejectReason::MissingDate),
        _ => return Ok(String::new()),
    };
    match parse_review_date(&text, profile.date_format) {
        Some(date) if profile.store_iso => Ok(to_iso_date(date)),
        Some(_) => Ok(text),
        None => Err(RejectReason::InvalidDate(single_line(&text))),
    }
}

/// Escape control characters so a reason stays on one log line.
fn single_line(value: &str) -> String {
    if !value.chars().any(char::is_control) {
        return value.to_string();
    }
    value
        .chars()
        .map(|ch| {
            if ch.is_control() {
                ch.escape_default().to_string()
            } else {
                ch.to_string()
            }
        })
        .collect()
}
