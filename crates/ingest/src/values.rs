//! Best-effort parsing of loosely formatted cell values.
//!
//! Spreadsheet exports carry dates and amounts in whatever format the author's
//! locale produced. None of these helpers fail: anything they cannot read is
//! reported as `None` and the sanitizer falls back to a default.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::FieldValue;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%a %b %d %Y",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Interprets `input` as a calendar date.
///
/// Date-times carrying an offset are converted to UTC before the date is
/// taken; date-times without one keep their written date.
///
/// ```rust
/// use chrono::NaiveDate;
/// use ingest::parse_date;
///
/// let jan_first = NaiveDate::from_ymd_opt(2025, 1, 1);
/// assert_eq!(parse_date("2025-01-01"), jan_first);
/// assert_eq!(parse_date("01/01/2025"), jan_first);
/// assert_eq!(parse_date("January 1, 2025"), jan_first);
/// assert_eq!(parse_date("2025-01-01T23:30:00-02:00"), NaiveDate::from_ymd_opt(2025, 1, 2));
/// assert_eq!(parse_date("not-a-date"), None);
/// assert_eq!(parse_date(""), None);
/// ```
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parses a decimal number. Blank, non-numeric and non-finite input is `None`.
///
/// ```rust
/// use ingest::parse_number;
///
/// assert_eq!(parse_number(" 1000 "), Some(1000.0));
/// assert_eq!(parse_number("-12.5"), Some(-12.5));
/// assert_eq!(parse_number("1,000"), None);
/// assert_eq!(parse_number("NaN"), None);
/// ```
pub fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric view of a cell.
pub(crate) fn number_value(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Absent => None,
        FieldValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        FieldValue::Text(s) => parse_number(s),
    }
}

/// Integral view of a cell, used for explicit contract ids.
///
/// Fractional or out-of-range values are not ids.
pub(crate) fn integer_value(value: &FieldValue) -> Option<i64> {
    if let FieldValue::Text(s) = value {
        if let Ok(id) = s.trim().parse::<i64>() {
            return Some(id);
        }
    }
    let n = number_value(value)?;
    if n.fract() != 0.0 || n < i64::MIN as f64 || n >= i64::MAX as f64 {
        return None;
    }
    Some(n as i64)
}

/// Date view of a cell. Bare numbers are not dates.
pub(crate) fn date_value(value: &FieldValue) -> Option<NaiveDate> {
    match value {
        FieldValue::Text(s) => parse_date(s),
        FieldValue::Absent | FieldValue::Number(_) => None,
    }
}

/// Text view of a cell: non-whitespace control characters optionally
/// removed, trimmed, blank collapsed to `None`. Line breaks and tabs inside
/// the value are kept.
pub(crate) fn text_value(value: &FieldValue, strip_control: bool) -> Option<String> {
    let raw = value.as_text()?;
    let cleaned = if strip_control {
        raw.chars()
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect::<String>()
    } else {
        raw.into_owned()
    };
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
