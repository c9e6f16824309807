//! Log line parser.
//!
//! Accepts lines shaped like `2023-04-17 10:30:45 [INFO] Log message` and
//! produces a [`ParsedLine`]. Anything else yields a [`Rejected`] reason;
//! callers that only care about the number of accepted lines can use
//! [`parse_batch`].

use chrono::{NaiveDateTime, Timelike};

use crate::types::EventTime;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// `strftime` format of the date and time fields joined by a single space.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of the `YYYY-MM-DD` field.
const DATE_WIDTH: usize = 10;

/// Width of the `HH:MM:SS` field.
const TIME_WIDTH: usize = 8;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The fields extracted from one well-formed log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: EventTime,
    /// Level token with the surrounding brackets stripped.
    pub level: String,
    /// Everything after the third space, verbatim.
    pub message: String,
}

/// Why a line produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    #[error("line has fewer than 4 space-separated fields")]
    TooFewFields,

    #[error("date and time are not a valid YYYY-MM-DD HH:MM:SS timestamp")]
    InvalidTimestamp,
}

/// Result of parsing a whole batch of lines.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub entries: Vec<ParsedLine>,
    pub rejected: usize,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a single log line.
///
/// The line is trimmed, then split on single spaces into at most four fields.
/// The fourth field keeps any embedded whitespace. Success is all-or-nothing.
pub fn parse_line(line: &str) -> Result<ParsedLine, Rejected> {
    let mut fields = line.trim().splitn(4, ' ');

    let (Some(date), Some(time), Some(level), Some(message)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(Rejected::TooFewFields);
    };

    if date.len() != DATE_WIDTH || time.len() != TIME_WIDTH {
        return Err(Rejected::InvalidTimestamp);
    }

    let timestamp = NaiveDateTime::parse_from_str(&format!("{date} {time}"), TIMESTAMP_FORMAT)
        .map_err(|_| Rejected::InvalidTimestamp)?;

    // chrono accepts second 60 as a leap second; SQLite date functions do not.
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(Rejected::InvalidTimestamp);
    }

    Ok(ParsedLine {
        timestamp,
        level: level.trim_matches(|c| c == '[' || c == ']').to_string(),
        message: message.to_string(),
    })
}

/// Parse every line, keeping the successes in input order.
pub fn parse_batch<I, S>(lines: I) -> ParsedBatch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut batch = ParsedBatch::default();
    for line in lines {
        match parse_line(line.as_ref()) {
            Ok(entry) => batch.entries.push(entry),
            Err(_) => batch.rejected += 1,
        }
    }
    batch
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
