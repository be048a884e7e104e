use feedback_model::{RawRecord, Source};

/// Ordered raw records decoded from one source.
///
/// Decoding finishes before the first record is handed out, so a
/// document-level fault is reported before any record is consumed.
#[derive(Debug)]
pub struct RawRecords {
    source: Source,
    inner: std::vec::IntoIter<RawRecord>,
}

impl RawRecords {
    pub(crate) fn new(source: Source, records: Vec<RawRecord>) -> Self {
        Self {
            source,
            inner: records.into_iter(),
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }
}

impl Iterator for RawRecords {
    type Item = RawRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for RawRecords {}
