use std::path::PathBuf;

use feedback_model::Source;
use feedback_report::AnalysisReport;
use serde::Serialize;

/// Per-source ingestion counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub source: Source,
    pub path: PathBuf,
    pub read: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// A source that could not be read and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub source: Source,
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub sources: Vec<SourceSummary>,
    pub failures: Vec<SourceFailure>,
    pub report: AnalysisReport,
}

impl RunResult {
    pub fn total_rejected(&self) -> usize {
        self.sources.iter().map(|summary| summary.rejected).sum()
    }
}
