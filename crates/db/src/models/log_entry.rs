//! Log entry entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use logscope_core::types::{DbId, EventTime, Timestamp};

/// A row from the `log_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LogEntry {
    pub id: DbId,
    pub timestamp: EventTime,
    pub level: String,
    pub message: String,
    pub source_file: String,
    pub created_at: Timestamp,
}

/// One source file group, as listed for the file selector.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SourceFileSummary {
    pub filename: String,
    /// Earliest ingestion time of any entry in the group.
    pub first_upload: Timestamp,
    pub entry_count: i64,
}

/// Conjunctive filters for listing log entries. `None` means unconstrained.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub source_file: Option<String>,
    pub level: Option<String>,
    /// Inclusive lower bound on `timestamp`.
    pub start: Option<EventTime>,
    /// Inclusive upper bound on `timestamp`.
    pub end: Option<EventTime>,
    /// Literal substring of `message`, ASCII case-insensitive.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
