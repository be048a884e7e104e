//! Review date parsing.
//!
//! Dates are three hyphen-separated numeric parts with a four digit year.
//! Day and month may omit the leading zero (`1-2-2024`), matching what the
//! upstream exports produce. The value must name a real calendar day.

use chrono::NaiveDate;

/// Field order of a review date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `DD-MM-YYYY`, used by the survey export.
    DayMonthYear,
    /// `YYYY-MM-DD` (ISO calendar date).
    YearMonthDay,
}

impl DateFormat {
    /// Human-readable pattern.
    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "DD-MM-YYYY",
            DateFormat::YearMonthDay => "YYYY-MM-DD",
        }
    }
}

/// Parse a review date in the given field order.
///
/// Returns `None` for anything that is not a valid calendar date in that
/// order, including surrounding whitespace.
pub fn parse_review_date(value: &str, format: DateFormat) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let (first, second, third) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let (year, month, day) = match format {
        DateFormat::DayMonthYear => (third, second, first),
        DateFormat::YearMonthDay => (first, second, third),
    };
    if year.len() != 4 || !(1..=2).contains(&month.len()) || !(1..=2).contains(&day.len()) {
        return None;
    }
    let year: i32 = parse_digits(year)?;
    let month: u32 = parse_digits(month)?;
    let day: u32 = parse_digits(day)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Render a date in ISO `YYYY-MM-DD` form.
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_digits<T: std::str::FromStr>(part: &str) -> Option<T> {
    if part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}
