use serde::{Deserialize, Serialize};

use crate::source::Source;

/// A record that failed validation, as written to the error log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionEntry {
    pub source: Source,
    /// 1-based position within the source input, not the surrogate key.
    pub position: usize,
    pub reason: String,
}

impl RejectionEntry {
    pub fn new(source: Source, position: usize, reason: impl Into<String>) -> Self {
        Self {
            source,
            position,
            reason: reason.into(),
        }
    }

    /// Formats the entry as a single error-log line without the newline.
    pub fn log_line(&self) -> String {
        format!(
            "[{}] Record {}: {}",
            self.source.log_tag(),
            self.position,
            self.reason
        )
    }
}
