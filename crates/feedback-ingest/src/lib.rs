//! Source readers for the feedback pipeline.
//!
//! One reader per external encoding, each producing [`RawRecords`] with
//! 1-based positions. Reader errors are fatal for the whole source.

pub mod error;
pub mod markup;
pub mod records;
pub mod structured;
pub mod tabular;

use std::path::Path;

use feedback_model::Source;

pub use error::{IngestError, Result};
pub use markup::{read_markup, read_markup_from_reader};
pub use records::RawRecords;
pub use structured::{read_structured, read_structured_from_reader};
pub use tabular::{read_tabular, read_tabular_from_reader};

/// Read `path` with the reader matching `source`.
pub fn read_source(source: Source, path: &Path) -> Result<RawRecords> {
    match source {
        Source::Tabular => read_tabular(path),
        Source::Structured => read_structured(path),
        Source::MarkupTree => read_markup(path),
    }
}
