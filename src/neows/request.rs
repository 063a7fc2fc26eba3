//! Query-string validation. Runs to completion before any upstream call.

use chrono::NaiveDate;

use crate::error::{NeoError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar range, `start <= end <= today` at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Formats a bound the way the upstream expects it.
    pub fn format(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// chrono accepts unpadded fields (`2024-1-5`), so the shape is checked
/// before parsing.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(NeoError::InvalidDateFormat(text.to_string()));
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| NeoError::InvalidDateFormat(text.to_string()))
}

/// Checks ordering and the no-future-dates policy on parsed dates.
pub fn validate_range(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<DateRange> {
    if start > end {
        return Err(NeoError::InvalidRange { start, end });
    }

    if start > today || end > today {
        return Err(NeoError::FutureDateNotAllowed { today });
    }

    Ok(DateRange { start, end })
}

/// Parses both bounds, then validates them against `today`.
pub fn parse_range(start: &str, end: &str, today: NaiveDate) -> Result<DateRange> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    validate_range(start, end, today)
}
