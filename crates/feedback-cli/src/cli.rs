//! CLI argument definitions for the feedback analytics tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use feedback_cli::config::{DEFAULT_DATA_DIR, DEFAULT_DATABASE, DEFAULT_ERROR_LOG};

#[derive(Parser)]
#[command(
    name = "feedback-analytics",
    version,
    about = "Ingest customer feedback exports and report on them",
    long_about = "Ingest customer feedback from a CSV survey export, a JSON web feedback \
                  export and an XML external review feed.\n\n\
                  Valid records are staged in SQLite, rejected records are appended to an \
                  error log, and four reports run over the combined data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow customer ids in trace-level log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest all three sources, then print the reports.
    Run(RunArgs),

    /// Print the reports for an existing staging database.
    Report(ReportArgs),

    /// List the supported sources and their validation rules.
    Sources,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder holding the three default input files.
    #[arg(long = "data-dir", value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Survey CSV (default: <DATA_DIR>/customer_survey.csv).
    #[arg(long = "survey", value_name = "PATH")]
    pub survey: Option<PathBuf>,

    /// Web feedback JSON (default: <DATA_DIR>/web_feedback.json).
    #[arg(long = "web", value_name = "PATH")]
    pub web: Option<PathBuf>,

    /// External reviews XML (default: <DATA_DIR>/external_reviews.xml).
    #[arg(long = "external", value_name = "PATH")]
    pub external: Option<PathBuf>,

    /// SQLite database holding the staging tables.
    #[arg(long = "database", value_name = "PATH", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// File that receives one line per rejected record.
    #[arg(long = "error-log", value_name = "PATH", default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Start the error log empty instead of appending to it.
    #[arg(long = "truncate-error-log")]
    pub truncate_error_log: bool,

    /// Continue with the remaining sources when one cannot be read.
    ///
    /// By default a missing or unparseable source file aborts the run
    /// before any report is produced.
    #[arg(long = "skip-failed-sources")]
    pub skip_failed_sources: bool,

    /// Print the reports as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// SQLite database written by a previous run.
    #[arg(long = "database", value_name = "PATH", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Print the reports as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
