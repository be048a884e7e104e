//! XML external-review reader.
//!
//! Each direct `review` child of the root element is one record. Within a
//! review, the direct children named after canonical fields supply the
//! values; an empty element is kept as [`RawValue::Null`] so it stays
//! distinguishable from an absent one. The whole document is parsed before
//! any record is returned.

use std::io::Read;
use std::path::Path;

use feedback_model::{COMMENTS, CUSTOMER_ID, RATING, REVIEW_DATE, RawRecord, RawValue, Source};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::records::RawRecords;

const REVIEW_ELEMENT: &[u8] = b"review";
const FIELD_ELEMENTS: [&str; 4] = [CUSTOMER_ID, RATING, COMMENTS, REVIEW_DATE];

/// Where the parser currently is in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Root,
    Review,
    Field(&'static str),
    Ignored,
}

fn field_name(name: &[u8]) -> Option<&'static str> {
    FIELD_ELEMENTS
        .into_iter()
        .find(|field| field.as_bytes() == name)
}

/// Read a markup-tree source file.
pub fn read_markup(path: &Path) -> Result<RawRecords> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::open(path, e))?;
    parse_markup(&text, path)
}

/// Read markup from any reader; `path` is only used in errors.
pub fn read_markup_from_reader<R: Read>(mut reader: R, path: &Path) -> Result<RawRecords> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| IngestError::open(path, e))?;
    parse_markup(&text, path)
}

fn parse_markup(text: &str, path: &Path) -> Result<RawRecords> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Frame> = Vec::new();
    let mut records: Vec<RawRecord> = Vec::new();
    let mut current: Option<RawRecord> = None;
    let mut value = String::new();
    // Only text before a field's first child element belongs to the field.
    let mut collecting = false;
    let mut root_seen = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| IngestError::markup(path, format!("{e} at byte {}", reader.buffer_position())))?;
        match event {
            Event::Start(element) => {
                let frame = match stack.last() {
                    None => {
                        if root_seen {
                            return Err(IngestError::markup(path, "more than one root element"));
                        }
                        root_seen = true;
                        Frame::Root
                    }
                    Some(Frame::Root) if element.name().as_ref() == REVIEW_ELEMENT => {
                        current = Some(RawRecord::new(records.len() + 1));
                        Frame::Review
                    }
                    Some(Frame::Review) => match field_name(element.name().as_ref()) {
                        Some(field) => {
                            value.clear();
                            collecting = true;
                            Frame::Field(field)
                        }
                        None => Frame::Ignored,
                    },
                    Some(_) => {
                        collecting = false;
                        Frame::Ignored
                    }
                };
                stack.push(frame);
            }
            Event::Empty(element) => match stack.last() {
                None => {
                    if root_seen {
                        return Err(IngestError::markup(path, "more than one root element"));
                    }
                    root_seen = true;
                }
                Some(Frame::Root) if element.name().as_ref() == REVIEW_ELEMENT => {
                    records.push(RawRecord::new(records.len() + 1));
                }
                Some(Frame::Review) => {
                    if let (Some(field), Some(record)) =
                        (field_name(element.name().as_ref()), current.as_mut())
                    {
                        record
                            .fields
                            .entry(field.to_string())
                            .or_insert(RawValue::Null);
                    }
                }
                Some(_) => collecting = false,
            },
            Event::End(_) => match stack.pop() {
                Some(Frame::Field(field)) => {
                    collecting = false;
                    if let Some(record) = current.as_mut() {
                        let trimmed = value.trim();
                        let raw = if trimmed.is_empty() {
                            RawValue::Null
                        } else {
                            RawValue::Text(trimmed.to_string())
                        };
                        record.fields.entry(field.to_string()).or_insert(raw);
                    }
                }
                Some(Frame::Review) => {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                }
                Some(Frame::Root | Frame::Ignored) => {}
                None => return Err(IngestError::markup(path, "unexpected closing tag")),
            },
            Event::Text(text) => {
                if collecting && matches!(stack.last(), Some(Frame::Field(_))) {
                    let decoded = text.decode().map_err(|e| IngestError::markup(path, e))?;
                    value.push_str(&decoded);
                } else if stack.is_empty() {
                    let decoded = text.decode().map_err(|e| IngestError::markup(path, e))?;
                    if !decoded.trim().is_empty() {
                        return Err(IngestError::markup(path, "text outside the root element"));
                    }
                }
            }
            Event::CData(data) => {
                if collecting && matches!(stack.last(), Some(Frame::Field(_))) {
                    let decoded = data.decode().map_err(|e| IngestError::markup(path, e))?;
                    value.push_str(&decoded);
                }
            }
            Event::GeneralRef(reference) => {
                if collecting && matches!(stack.last(), Some(Frame::Field(_))) {
                    match reference
                        .resolve_char_ref()
                        .map_err(|e| IngestError::markup(path, e))?
                    {
                        Some(ch) => value.push(ch),
                        None => {
                            let name = reference.decode().map_err(|e| IngestError::markup(path, e))?;
                            let resolved = resolve_predefined_entity(&name).ok_or_else(|| {
                                IngestError::markup(path, format!("unknown entity &{name};"))
                            })?;
                            value.push_str(resolved);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(IngestError::markup(path, "document ended inside an open element"));
    }
    if !root_seen {
        return Err(IngestError::markup(path, "no root element"));
    }
    debug!(path = %path.display(), records = records.len(), "read markup source");
    Ok(RawRecords::new(Source::MarkupTree, records))
}
