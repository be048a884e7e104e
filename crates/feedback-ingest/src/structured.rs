//! JSON web-feedback reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use feedback_model::{RawRecord, RawValue, Source};
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::records::RawRecords;

/// Read a structured-record source file.
pub fn read_structured(path: &Path) -> Result<RawRecords> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    read_structured_from_reader(BufReader::new(file), path)
}

/// Read structured records from any reader; `path` is only used in errors.
pub fn read_structured_from_reader<R: Read>(reader: R, path: &Path) -> Result<RawRecords> {
    let document: Value = serde_json::from_reader(reader).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = document else {
        return Err(IngestError::NotAList {
            path: path.to_path_buf(),
            found: kind(&document),
        });
    };

    let records: Vec<RawRecord> = items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| to_raw_record(idx + 1, item))
        .collect();
    debug!(path = %path.display(), records = records.len(), "read structured source");
    Ok(RawRecords::new(Source::Structured, records))
}

fn to_raw_record(position: usize, item: Value) -> RawRecord {
    match item {
        Value::Object(map) => {
            let mut record = RawRecord::new(position);
            for (key, value) in map {
                record.insert(&key, to_raw_value(value));
            }
            record
        }
        other => RawRecord::malformed(
            position,
            format!("expected a JSON object, found {}", kind(&other)),
        ),
    }
}

fn to_raw_value(value: Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(flag) => RawValue::Bool(flag),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => RawValue::Integer(integer),
            None => RawValue::Float(number.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(text) => RawValue::Text(text),
        nested @ (Value::Array(_) | Value::Object(_)) => RawValue::Nested(nested.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_keep_integer_precision() {
        assert_eq!(to_raw_value(serde_json::json!(5)), RawValue::Integer(5));
        assert_eq!(to_raw_value(serde_json::json!(4.5)), RawValue::Float(4.5));
        assert!(matches!(
            to_raw_value(serde_json::json!([1, 2])),
            RawValue::Nested(_)
        ));
    }
}
