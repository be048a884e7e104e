//! Error types for feedback ingestion.
//!
//! Every variant is fatal for the source being read. Problems with a single
//! record are not errors; they travel inside the record and are rejected
//! during validation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Document-level failures while reading a source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// CSV could not be decoded.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON could not be decoded.
    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON decoded, but the top-level value is not a list.
    #[error("expected a JSON list of records in {path}, found {found}")]
    NotAList { path: PathBuf, found: &'static str },

    /// XML is not a well-formed tree.
    #[error("failed to parse XML {path}: {message}")]
    Markup { path: PathBuf, message: String },
}

impl IngestError {
    pub(crate) fn open(path: &Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }

    pub(crate) fn markup(path: &Path, message: impl ToString) -> Self {
        IngestError::Markup {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
