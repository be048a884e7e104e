//! Append-only rejection log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use feedback_model::RejectionEntry;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Destination for rejected records.
pub trait RejectionSink {
    fn reject(&mut self, entry: &RejectionEntry) -> Result<()>;
}

impl RejectionSink for Vec<RejectionEntry> {
    fn reject(&mut self, entry: &RejectionEntry) -> Result<()> {
        self.push(entry.clone());
        Ok(())
    }
}

/// Text file with one `[<SOURCE>] Record <n>: <reason>` line per rejection.
#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
    file: File,
    lines_written: usize,
}

impl ErrorLog {
    /// Open for appending, keeping lines from earlier runs.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| io_error(path, source))?;
        Ok(Self::from_file(path, file))
    }

    /// Open and truncate.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| io_error(path, source))?;
        debug!(path = %path.display(), "truncated error log");
        Ok(Self::from_file(path, file))
    }

    fn from_file(path: &Path, file: File) -> Self {
        Self {
            path: path.to_path_buf(),
            file,
            lines_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines written through this handle.
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }
}

impl RejectionSink for ErrorLog {
    fn reject(&mut self, entry: &RejectionEntry) -> Result<()> {
        writeln!(self.file, "{}", entry.log_line())
            .and_then(|()| self.file.flush())
            .map_err(|source| io_error(&self.path, source))?;
        self.lines_written += 1;
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
