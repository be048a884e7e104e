//! Comma-delimited survey reader.
//!
//! The first row names the fields; every later row becomes one record keyed
//! by those names. Cells missing from a short row are absent from the
//! record, cells beyond the header are dropped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use feedback_model::{RawRecord, Source};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::records::RawRecords;

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a tabular source file.
pub fn read_tabular(path: &Path) -> Result<RawRecords> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    read_tabular_from_reader(file, path)
}

/// Read tabular data from any reader; `path` is only used in errors.
pub fn read_tabular_from_reader<R: Read>(reader: R, path: &Path) -> Result<RawRecords> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(csv_error)?;
        let mut record = RawRecord::new(idx + 1);
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.insert(header, normalize_cell(cell));
        }
        records.push(record);
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        records = records.len(),
        "read tabular source"
    );
    Ok(RawRecords::new(Source::Tabular, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_trimmed_and_bom_stripped() {
        assert_eq!(normalize_header("\u{feff}customer_id "), "customer_id");
        assert_eq!(normalize_header(" review   date "), "review date");
    }
}
