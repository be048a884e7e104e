//! Persistence for the feedback pipeline: staging tables for accepted
//! records and the error log for rejected ones.

pub mod error;
pub mod error_log;
pub mod staging;

pub use error::{Result, StoreError};
pub use error_log::{ErrorLog, RejectionSink};
pub use staging::{StagingStore, UNION_VIEW};
