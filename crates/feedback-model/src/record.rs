//! Raw and normalized feedback records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::source::Source;

/// Canonical field names shared by all three sources.
pub const CUSTOMER_ID: &str = "customer_id";
pub const RATING: &str = "rating";
pub const COMMENTS: &str = "comments";
pub const REVIEW_DATE: &str = "review_date";

/// One decoded field value before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Arrays and objects, kept only as a compact rendering for messages.
    Nested(String),
}

impl RawValue {
    /// Returns the value as non-blank text, or `None` for null, blank,
    /// boolean and nested values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawValue::Integer(value) => Some(value.to_string()),
            RawValue::Float(value) => Some(value.to_string()),
            RawValue::Null | RawValue::Bool(_) | RawValue::Nested(_) => None,
        }
    }

    /// True for null and blank text.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => f.write_str("null"),
            RawValue::Text(value) => f.write_str(value),
            RawValue::Integer(value) => write!(f, "{value}"),
            RawValue::Float(value) => write!(f, "{value}"),
            RawValue::Bool(value) => write!(f, "{value}"),
            RawValue::Nested(value) => f.write_str(value),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

/// A source-specific field mapping as decoded from one input item.
///
/// `position` is the 1-based position within the source's sequence and is
/// what rejections are reported against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    pub position: usize,
    pub fields: BTreeMap<String, RawValue>,
    /// Set when the item could not be read as a field mapping at all.
    pub malformed: Option<String>,
}

impl RawRecord {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// An item that decoded, but not into a field mapping.
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self {
            position,
            fields: BTreeMap::new(),
            malformed: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<RawValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Field lookup; an absent key yields `None`.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    /// Non-blank text view of a field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(RawValue::as_text)
    }
}

/// A validated record in the canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub customer_id: String,
    pub rating: i64,
    pub comments: String,
    /// ISO `YYYY-MM-DD`, or empty when the source allows the date to be absent.
    pub review_date: String,
}

/// A record read back from a staging table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedRecord {
    pub source: Source,
    /// Surrogate key assigned by the staging table.
    pub sequence_id: i64,
    #[serde(flatten)]
    pub record: NormalizedRecord,
}
