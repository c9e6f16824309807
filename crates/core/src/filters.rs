//! Normalization of log query filter input.
//!
//! Query strings arrive as free text from the dashboard. Empty values mean
//! "no filter", date bounds may be a bare date or a date-time, and search
//! text is matched literally.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CoreError;
use crate::types::EventTime;

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Accepted date-time layouts for range bounds, most specific first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Which end of an inclusive range a bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Start,
    End,
}

/// Treat `None`, empty and whitespace-only values alike as "not set".
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse an inclusive range bound.
///
/// A bare `YYYY-MM-DD` covers the whole day: it starts at `00:00:00` and ends
/// at `23:59:59`. A bound given to the minute is widened the same way to the
/// first or last second of that minute.
pub fn parse_date_bound(input: &str, kind: BoundKind) -> Result<EventTime, CoreError> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let time = match kind {
            BoundKind::Start => NaiveTime::MIN,
            BoundKind::End => end_of_day(),
        };
        return Ok(date.and_time(time));
    }

    for (idx, format) in DATETIME_FORMATS.iter().enumerate() {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            let minute_precision = idx >= 2;
            if minute_precision && kind == BoundKind::End {
                return Ok(parsed + chrono::Duration::seconds(59));
            }
            return Ok(parsed);
        }
    }

    Err(CoreError::Validation(format!(
        "Invalid date '{input}': expected YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]"
    )))
}

/// Build a `LIKE` pattern that matches `needle` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped with [`LIKE_ESCAPE`],
/// so the query must use `LIKE ? ESCAPE '\'`.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}
