//! Ingestion run with explicit stages.
//!
//! 1. **Reset**: drop and recreate the staging tables and union view
//! 2. **Read**: decode all three documents in rank order
//! 3. **Ingest**: for each decoded source, normalize every record, log
//!    rejections, stage accepted rows
//! 4. **Report**: run the four analysis queries over the union view
//!
//! Nothing is staged or logged until every document has decoded, so an
//! aborted run leaves the staging tables empty.
//!
//! Record-level problems never stop a run. A source that cannot be read
//! at all is handled by [`OnSourceError`]; store and error log failures
//! always abort.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace, warn};

use feedback_ingest::{RawRecords, read_source};
use feedback_model::Source;
use feedback_report::ReportEngine;
use feedback_store::{RejectionSink, StagingStore};
use feedback_validate::{Outcome, normalize};

use crate::config::{OnSourceError, RunConfig};
use crate::logging::redact_value;
use crate::types::{RunResult, SourceFailure, SourceSummary};

/// Read one source document and stage its accepted records.
///
/// Rejected records are written to `sink` in input order. Accepted rows are
/// inserted in a single transaction after the whole document is normalized.
pub fn ingest_source(
    source: Source,
    path: &Path,
    store: &mut StagingStore,
    sink: &mut dyn RejectionSink,
) -> Result<SourceSummary> {
    let records = read_source(source, path)
        .with_context(|| format!("read {source} source {}", path.display()))?;
    ingest_records(source, path, records, store, sink)
}

/// Normalize already decoded records and stage the accepted ones.
pub fn ingest_records(
    source: Source,
    path: &Path,
    records: RawRecords,
    store: &mut StagingStore,
    sink: &mut dyn RejectionSink,
) -> Result<SourceSummary> {
    let span = info_span!("ingest", source = %source, path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let read = records.len();
    let mut accepted = Vec::with_capacity(read);
    let mut rejected = 0usize;
    for raw in records {
        match normalize(&raw, source) {
            Outcome::Accepted(record) => {
                trace!(
                    position = raw.position,
                    customer_id = %redact_value(&record.customer_id),
                    rating = record.rating,
                    "staging record"
                );
                accepted.push(record);
            }
            Outcome::Rejected(entry) => {
                debug!(position = entry.position, reason = %entry.reason, "record rejected");
                sink.reject(&entry)
                    .with_context(|| format!("log rejection for {source} record {}", entry.position))?;
                rejected += 1;
            }
        }
    }

    let staged = store
        .insert_batch(source, &accepted)
        .with_context(|| format!("stage {source} records into {}", source.table_name()))?;
    info!(
        read,
        accepted = staged,
        rejected,
        duration_ms = start.elapsed().as_millis(),
        "source ingested"
    );
    Ok(SourceSummary {
        source,
        path: path.to_path_buf(),
        read,
        accepted: staged,
        rejected,
    })
}

/// Reset the staging schema, ingest every source, then run the reports.
pub fn run(
    config: &RunConfig,
    store: &mut StagingStore,
    sink: &mut dyn RejectionSink,
) -> Result<RunResult> {
    let run_start = Instant::now();
    store.reset_schema().context("reset staging schema")?;

    let mut decoded = Vec::with_capacity(Source::ALL.len());
    let mut failures = Vec::new();
    for source in Source::ALL {
        let path = config.inputs.path(source);
        match read_source(source, path) {
            Ok(records) => decoded.push((source, path, records)),
            Err(error) => {
                let error = anyhow::Error::new(error)
                    .context(format!("read {source} source {}", path.display()));
                match config.on_source_error {
                    OnSourceError::Abort => return Err(error),
                    OnSourceError::Skip => {
                        warn!(source = %source, path = %path.display(), "skipping source: {error:#}");
                        failures.push(SourceFailure {
                            source,
                            path: path.to_path_buf(),
                            message: format!("{error:#}"),
                        });
                    }
                }
            }
        }
    }

    let mut sources = Vec::with_capacity(decoded.len());
    for (source, path, records) in decoded {
        sources.push(ingest_records(source, path, records, store, sink)?);
    }

    let report = info_span!("report").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let report = ReportEngine::new(store).run_all().context("run analysis reports")?;
        info!(duration_ms = start.elapsed().as_millis(), "reports complete");
        Ok(report)
    })?;

    info!(
        sources = sources.len(),
        skipped = failures.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunResult {
        sources,
        failures,
        report,
    })
}
