/// Log entry primary keys are SQLite `INTEGER PRIMARY KEY` values.
pub type DbId = i64;

/// Ingestion timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Event times as written in the log file. Source lines carry no zone.
pub type EventTime = chrono::NaiveDateTime;
