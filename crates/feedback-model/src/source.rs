//! Feedback sources and their fixed identities.
//!
//! Each source has three names: the variant used in code, the short tag
//! written into error-log lines, and the staging table that holds its
//! accepted records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The external encoding a feedback record arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Comma-delimited customer survey export.
    Tabular,
    /// JSON list of web feedback objects.
    Structured,
    /// XML document of external reviews.
    MarkupTree,
}

impl Source {
    /// All sources in processing order.
    pub const ALL: [Source; 3] = [Source::Tabular, Source::Structured, Source::MarkupTree];

    /// Tag used in error-log lines (`[CSV] Record 3: ...`).
    pub fn log_tag(self) -> &'static str {
        match self {
            Source::Tabular => "CSV",
            Source::Structured => "JSON",
            Source::MarkupTree => "XML",
        }
    }

    /// Name of the staging table holding this source's records.
    pub fn table_name(self) -> &'static str {
        match self {
            Source::Tabular => "survey_staging",
            Source::Structured => "web_staging",
            Source::MarkupTree => "external_staging",
        }
    }

    /// Position of the source in the unioned view.
    pub fn rank(self) -> i64 {
        match self {
            Source::Tabular => 1,
            Source::Structured => 2,
            Source::MarkupTree => 3,
        }
    }

    /// Inverse of [`Source::rank`].
    pub fn from_rank(rank: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.rank() == rank)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Source::Tabular => "tabular",
            Source::Structured => "structured",
            Source::MarkupTree => "markup_tree",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = ModelError;

    /// Accepts the variant name, the log tag, or the staging table name
    /// (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "tabular" | "csv" | "survey" | "survey_staging" => Ok(Source::Tabular),
            "structured" | "json" | "web" | "web_staging" => Ok(Source::Structured),
            "markup_tree" | "markuptree" | "markup" | "xml" | "external"
            | "external_staging" => Ok(Source::MarkupTree),
            _ => Err(ModelError::UnknownSource(s.to_string())),
        }
    }
}
