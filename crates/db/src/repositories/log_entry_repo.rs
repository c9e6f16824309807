//! Repository for the `log_entries` table.

use logscope_core::filters::like_pattern;
use logscope_core::parser::ParsedLine;
use logscope_core::types::{EventTime, Timestamp};
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqliteConnection};

use crate::models::analytics::{DailyCountRow, HourlyLevelRow, LevelCountRow, MessageCountRow};
use crate::models::log_entry::{LogEntry, LogQuery, SourceFileSummary};
use crate::DbPool;

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `log_entries` SELECT queries.
const COLUMNS: &str = "id, timestamp, level, message, source_file, created_at";

/// Column list for INSERT (excludes auto-generated `id`).
const INSERT_COLUMNS: &str = "timestamp, level, message, source_file, created_at";

/// Bind parameters per inserted row.
const BINDS_PER_ROW: usize = 5;

/// Rows per multi-row INSERT. Keeps a statement under SQLite's historical
/// limit of 999 bound parameters.
const INSERT_CHUNK_ROWS: usize = 999 / BINDS_PER_ROW;

// ---------------------------------------------------------------------------
// LogEntryRepo
// ---------------------------------------------------------------------------

/// Provides insert, query, delete and aggregation operations for log entries.
pub struct LogEntryRepo;

impl LogEntryRepo {
    /// Insert parsed lines as entries of `source_file`, in input order.
    ///
    /// Takes a connection so the caller can run it inside a transaction.
    /// Returns the number of rows inserted.
    pub async fn insert_batch(
        conn: &mut SqliteConnection,
        source_file: &str,
        entries: &[ParsedLine],
        created_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0u64;

        for chunk in entries.chunks(INSERT_CHUNK_ROWS) {
            let placeholders = vec!["(?, ?, ?, ?, ?)"; chunk.len()].join(", ");
            let query = format!("INSERT INTO log_entries ({INSERT_COLUMNS}) VALUES {placeholders}");

            let mut q = sqlx::query(&query);
            for entry in chunk {
                q = q
                    .bind(entry.timestamp)
                    .bind(&entry.level)
                    .bind(&entry.message)
                    .bind(source_file)
                    .bind(created_at);
            }

            inserted += q.execute(&mut *conn).await?.rows_affected();
        }

        Ok(inserted)
    }

    /// List entries matching every filter in `params`, in insertion order.
    pub async fn query(pool: &DbPool, params: &LogQuery) -> Result<Vec<LogEntry>, sqlx::Error> {
        let (where_clause, mut bind_values) = build_log_filter(params);

        let mut query = format!("SELECT {COLUMNS} FROM log_entries {where_clause} ORDER BY id ASC");

        if params.limit.is_some() || params.offset.is_some() {
            // SQLite treats a negative LIMIT as "no limit".
            query.push_str(" LIMIT ? OFFSET ?");
            bind_values.push(BindValue::BigInt(params.limit.map_or(-1, |l| l.max(0))));
            bind_values.push(BindValue::BigInt(params.offset.unwrap_or(0).max(0)));
        }

        bind_log_values(sqlx::query_as::<_, LogEntry>(&query), &bind_values)
            .fetch_all(pool)
            .await
    }

    /// List source file groups ordered by their first ingestion.
    ///
    /// Groups are derived from the entries themselves, so a fully deleted
    /// group never appears.
    pub async fn list_source_files(pool: &DbPool) -> Result<Vec<SourceFileSummary>, sqlx::Error> {
        sqlx::query_as::<_, SourceFileSummary>(
            "SELECT source_file AS filename, \
                    MIN(created_at) AS first_upload, \
                    COUNT(*) AS entry_count \
             FROM log_entries \
             GROUP BY source_file \
             ORDER BY MIN(created_at) ASC, MIN(id) ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete every entry of `source_file`. Returns the number of rows removed.
    pub async fn delete_by_source_file(pool: &DbPool, source_file: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM log_entries WHERE source_file = ?")
            .bind(source_file)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Aggregation queries
    //
    // These take a connection so the analytics views can be read from one
    // snapshot. `source_file` optionally scopes every query to one group.
    // -----------------------------------------------------------------------

    /// Count entries per level, ordered by level.
    pub async fn count_by_level(
        conn: &mut SqliteConnection,
        source_file: Option<&str>,
    ) -> Result<Vec<LevelCountRow>, sqlx::Error> {
        let query = format!(
            "SELECT level, COUNT(*) AS count FROM log_entries {} \
             GROUP BY level \
             ORDER BY level ASC",
            scope_clause(source_file)
        );
        let mut q = sqlx::query_as::<_, LevelCountRow>(&query);
        if let Some(source_file) = source_file {
            q = q.bind(source_file);
        }
        q.fetch_all(conn).await
    }

    /// Count entries per calendar date, ascending.
    pub async fn count_by_date(
        conn: &mut SqliteConnection,
        source_file: Option<&str>,
    ) -> Result<Vec<DailyCountRow>, sqlx::Error> {
        let query = format!(
            "SELECT date(timestamp) AS date, COUNT(*) AS count FROM log_entries {} \
             GROUP BY date(timestamp) \
             ORDER BY date(timestamp) ASC",
            scope_clause(source_file)
        );
        let mut q = sqlx::query_as::<_, DailyCountRow>(&query);
        if let Some(source_file) = source_file {
            q = q.bind(source_file);
        }
        q.fetch_all(conn).await
    }

    /// The `limit` most frequent messages; ties ordered by message.
    pub async fn top_messages(
        conn: &mut SqliteConnection,
        source_file: Option<&str>,
        limit: i64,
    ) -> Result<Vec<MessageCountRow>, sqlx::Error> {
        let query = format!(
            "SELECT message, COUNT(*) AS count FROM log_entries {} \
             GROUP BY message \
             ORDER BY count DESC, message ASC \
             LIMIT ?",
            scope_clause(source_file)
        );
        let mut q = sqlx::query_as::<_, MessageCountRow>(&query);
        if let Some(source_file) = source_file {
            q = q.bind(source_file);
        }
        q.bind(limit).fetch_all(conn).await
    }

    /// Sparse counts per `(date, hour, level)` for combinations with entries.
    pub async fn count_by_date_hour_level(
        conn: &mut SqliteConnection,
        source_file: Option<&str>,
    ) -> Result<Vec<HourlyLevelRow>, sqlx::Error> {
        let query = format!(
            "SELECT date(timestamp) AS date, \
                    CAST(strftime('%H', timestamp) AS INTEGER) AS hour, \
                    level, \
                    COUNT(*) AS count \
             FROM log_entries {} \
             GROUP BY date(timestamp), strftime('%H', timestamp), level \
             ORDER BY date ASC, hour ASC, level ASC",
            scope_clause(source_file)
        );
        let mut q = sqlx::query_as::<_, HourlyLevelRow>(&query);
        if let Some(source_file) = source_file {
            q = q.bind(source_file);
        }
        q.fetch_all(conn).await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built log queries.
enum BindValue {
    BigInt(i64),
    Text(String),
    Time(EventTime),
}

fn scope_clause(source_file: Option<&str>) -> &'static str {
    if source_file.is_some() {
        "WHERE source_file = ?"
    } else {
        ""
    }
}

/// Build a WHERE clause and bind values from `LogQuery` filter parameters.
///
/// The clause is empty if no filters are active, or starts with `WHERE `.
/// Bind values are in placeholder order.
fn build_log_filter(params: &LogQuery) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<&str> = Vec::new();
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref source_file) = params.source_file {
        conditions.push("source_file = ?");
        bind_values.push(BindValue::Text(source_file.clone()));
    }

    if let Some(ref level) = params.level {
        conditions.push("level = ?");
        bind_values.push(BindValue::Text(level.clone()));
    }

    if let Some(start) = params.start {
        conditions.push("timestamp >= ?");
        bind_values.push(BindValue::Time(start));
    }

    if let Some(end) = params.end {
        conditions.push("timestamp <= ?");
        bind_values.push(BindValue::Time(end));
    }

    if let Some(ref search) = params.search {
        conditions.push("message LIKE ? ESCAPE '\\'");
        bind_values.push(BindValue::Text(like_pattern(search)));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_log_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Time(v) => q = q.bind(*v),
        }
    }
    q
}
