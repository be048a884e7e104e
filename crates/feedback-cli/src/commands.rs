use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use feedback_cli::config::{OnSourceError, RunConfig, default_file_name};
use feedback_cli::pipeline;
use feedback_cli::types::RunResult;
use feedback_model::Source;
use feedback_report::{AnalysisReport, ReportEngine};
use feedback_store::{ErrorLog, StagingStore};
use feedback_validate::{RatingWhenAbsent, ValidationProfile};

use crate::cli::{ReportArgs, RunArgs};
use crate::summary::{apply_table_style, header_cell};

/// Outcome of the `run` command.
pub struct RunOutcome {
    pub result: RunResult,
    pub database: PathBuf,
    pub error_log: PathBuf,
    pub rejections_logged: usize,
}

pub fn list_sources() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Tag"),
        header_cell("Staging table"),
        header_cell("Default file"),
        header_cell("Date format"),
        header_cell("Date required"),
        header_cell("Missing rating"),
    ]);
    apply_table_style(&mut table);
    for source in Source::ALL {
        let profile = ValidationProfile::for_source(source);
        let missing_rating = match profile.rating_when_absent {
            RatingWhenAbsent::Reject => "missing field".to_string(),
            RatingWhenAbsent::Sentinel(value) => format!("read as {value}, out of range"),
        };
        table.add_row(vec![
            source.as_str().to_string(),
            source.log_tag().to_string(),
            source.table_name().to_string(),
            default_file_name(source).to_string(),
            profile.date_format.as_str().to_string(),
            if profile.date_required { "yes" } else { "no" }.to_string(),
            missing_rating,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_pipeline(args: &RunArgs) -> Result<RunOutcome> {
    let span = info_span!("run", database = %args.database.display());
    let _guard = span.enter();

    let mut config = RunConfig::from_data_dir(&args.data_dir);
    let overrides = [
        (Source::Tabular, &args.survey),
        (Source::Structured, &args.web),
        (Source::MarkupTree, &args.external),
    ];
    for (source, path) in overrides {
        if let Some(path) = path {
            config = config.with_input(source, path.clone());
        }
    }
    if args.skip_failed_sources {
        config = config.with_on_source_error(OnSourceError::Skip);
    }

    let mut store = StagingStore::open(&args.database)
        .with_context(|| format!("open database {}", args.database.display()))?;
    let mut error_log = if args.truncate_error_log {
        ErrorLog::create(&args.error_log)
    } else {
        ErrorLog::open(&args.error_log)
    }
    .with_context(|| format!("open error log {}", args.error_log.display()))?;

    let result = pipeline::run(&config, &mut store, &mut error_log)?;
    info!(
        rejections = error_log.lines_written(),
        error_log = %error_log.path().display(),
        "rejections logged"
    );
    Ok(RunOutcome {
        result,
        database: args.database.clone(),
        error_log: args.error_log.clone(),
        rejections_logged: error_log.lines_written(),
    })
}

pub fn run_report(args: &ReportArgs) -> Result<AnalysisReport> {
    if !args.database.is_file() {
        bail!(
            "database {} not found; run the `run` command first",
            args.database.display()
        );
    }
    let store = StagingStore::open(&args.database)
        .with_context(|| format!("open database {}", args.database.display()))?;
    ReportEngine::new(&store)
        .run_all()
        .with_context(|| format!("run reports against {}", args.database.display()))
}
