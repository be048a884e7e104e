use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("staging database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("error log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown source rank {0} in staging view")]
    UnknownSourceRank(i64),
}

pub type Result<T> = std::result::Result<T, StoreError>;
