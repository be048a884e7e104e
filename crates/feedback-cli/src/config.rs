//! Run configuration: where each source lives and how source faults are handled.

use std::path::{Path, PathBuf};

use feedback_model::Source;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DATABASE: &str = "ecommerce_feedback.db";
pub const DEFAULT_ERROR_LOG: &str = "error_log.txt";

/// Default input file name for a source inside the data directory.
pub fn default_file_name(source: Source) -> &'static str {
    match source {
        Source::Tabular => "customer_survey.csv",
        Source::Structured => "web_feedback.json",
        Source::MarkupTree => "external_reviews.xml",
    }
}

/// What to do when a source cannot be read at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnSourceError {
    /// Stop the run; no reports are produced.
    #[default]
    Abort,
    /// Record the failure and continue with the remaining sources.
    Skip,
}

/// Input file for each source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInputs {
    pub tabular: PathBuf,
    pub structured: PathBuf,
    pub markup_tree: PathBuf,
}

impl SourceInputs {
    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            tabular: data_dir.join(default_file_name(Source::Tabular)),
            structured: data_dir.join(default_file_name(Source::Structured)),
            markup_tree: data_dir.join(default_file_name(Source::MarkupTree)),
        }
    }

    pub fn path(&self, source: Source) -> &Path {
        match source {
            Source::Tabular => &self.tabular,
            Source::Structured => &self.structured,
            Source::MarkupTree => &self.markup_tree,
        }
    }

    pub fn set_path(&mut self, source: Source, path: PathBuf) {
        match source {
            Source::Tabular => self.tabular = path,
            Source::Structured => self.structured = path,
            Source::MarkupTree => self.markup_tree = path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub inputs: SourceInputs,
    pub on_source_error: OnSourceError,
}

impl RunConfig {
    pub fn from_data_dir(data_dir: &Path) -> Self {
        Self {
            inputs: SourceInputs::in_dir(data_dir),
            on_source_error: OnSourceError::default(),
        }
    }

    #[must_use]
    pub fn with_input(mut self, source: Source, path: PathBuf) -> Self {
        self.inputs.set_path(source, path);
        self
    }

    #[must_use]
    pub fn with_on_source_error(mut self, policy: OnSourceError) -> Self {
        self.on_source_error = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_defaults() {
        let config = RunConfig::from_data_dir(Path::new("feedback"));
        assert_eq!(
            config.inputs.path(Source::Structured),
            Path::new("feedback/web_feedback.json")
        );
        assert_eq!(config.on_source_error, OnSourceError::Abort);
    }

    #[test]
    fn overrides_replace_one_source() {
        let config = RunConfig::from_data_dir(Path::new("data"))
            .with_input(Source::MarkupTree, PathBuf::from("/tmp/reviews.xml"));
        assert_eq!(
            config.inputs.path(Source::MarkupTree),
            Path::new("/tmp/reviews.xml")
        );
        assert_eq!(
            config.inputs.path(Source::Tabular),
            Path::new("data/customer_survey.csv")
        );
    }
}
