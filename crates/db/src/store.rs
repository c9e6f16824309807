//! The log store: ingestion, querying and analytics over one pool.
//!
//! [`LogStore`] is the only owner of the database pool. Every operation
//! acquires what it needs from the pool and releases it before returning.
//! Parse rejections never surface as errors; they only lower the number of
//! entries reported by [`LogStore::ingest`].

use std::io::BufRead;

use chrono::Utc;
use logscope_core::analytics::{
    build_hourly_matrix, rank_top_messages, Analytics, HourlyLevelCount, DEFAULT_TOP_MESSAGES,
};
use logscope_core::levels::LevelSet;
use logscope_core::parser::parse_batch;

use crate::error::StorageResult;
use crate::models::log_entry::{LogEntry, LogQuery, SourceFileSummary};
use crate::repositories::LogEntryRepo;
use crate::DbPool;

/// Engine facade over the `log_entries` table.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct LogStore {
    pool: DbPool,
    tracked_levels: LevelSet,
    top_messages: usize,
}

impl LogStore {
    /// Wrap an existing pool, using the default tracked levels and top-5
    /// messages.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            tracked_levels: LevelSet::default(),
            top_messages: DEFAULT_TOP_MESSAGES,
        }
    }

    /// Levels always present in the hourly matrix.
    pub fn with_tracked_levels(mut self, levels: LevelSet) -> Self {
        self.tracked_levels = levels;
        self
    }

    /// Number of entries in the top messages view.
    pub fn with_top_messages(mut self, limit: usize) -> Self {
        self.top_messages = limit;
        self
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn tracked_levels(&self) -> &LevelSet {
        &self.tracked_levels
    }

    // -----------------------------------------------------------------------
    // Ingestion
    // -----------------------------------------------------------------------

    /// Parse `lines` and append every well-formed one to `source_file`.
    ///
    /// The batch is committed in one transaction: either every accepted line
    /// becomes visible or none does. Returns the number of entries added.
    pub async fn ingest<I, S>(&self, source_file: &str, lines: I) -> StorageResult<u64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = parse_batch(lines);

        if batch.entries.is_empty() {
            tracing::info!(
                source_file,
                rejected = batch.rejected,
                "No parseable lines, nothing ingested"
            );
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let added =
            LogEntryRepo::insert_batch(&mut tx, source_file, &batch.entries, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(
            source_file,
            records_added = added,
            rejected = batch.rejected,
            "Ingested log batch"
        );
        Ok(added)
    }

    /// Read raw log text from `reader` and ingest it line by line.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than failing the
    /// line. A read error aborts the whole batch before anything is written.
    pub async fn ingest_reader<R: BufRead>(
        &self,
        source_file: &str,
        reader: R,
    ) -> StorageResult<u64> {
        let lines = read_lines(reader)?;
        self.ingest(source_file, lines).await
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Source file groups that still have entries, oldest upload first.
    pub async fn list_source_files(&self) -> StorageResult<Vec<SourceFileSummary>> {
        Ok(LogEntryRepo::list_source_files(&self.pool).await?)
    }

    /// Entries matching all filters in `params`, in insertion order.
    pub async fn query(&self, params: &LogQuery) -> StorageResult<Vec<LogEntry>> {
        Ok(LogEntryRepo::query(&self.pool, params).await?)
    }

    /// Remove every entry of `source_file`.
    ///
    /// Deleting a group that does not exist is a successful no-op.
    pub async fn delete_group(&self, source_file: &str) -> StorageResult<u64> {
        let deleted = LogEntryRepo::delete_by_source_file(&self.pool, source_file).await?;
        tracing::info!(source_file, deleted, "Deleted source file group");
        Ok(deleted)
    }

    // -----------------------------------------------------------------------
    // Analytics
    // -----------------------------------------------------------------------

    /// Compute all four analytics views, optionally scoped to one group.
    ///
    /// The views are read inside one transaction so they describe the same
    /// snapshot of the table. Nothing is cached.
    pub async fn analytics(&self, source_file: Option<&str>) -> StorageResult<Analytics> {
        let mut tx = self.pool.begin().await?;

        let levels = LogEntryRepo::count_by_level(&mut tx, source_file).await?;
        let daily = LogEntryRepo::count_by_date(&mut tx, source_file).await?;
        let messages = LogEntryRepo::top_messages(
            &mut tx,
            source_file,
            i64::try_from(self.top_messages).unwrap_or(i64::MAX),
        )
        .await?;
        let hourly = LogEntryRepo::count_by_date_hour_level(&mut tx, source_file).await?;

        tx.commit().await?;

        let hourly: Vec<HourlyLevelCount> = hourly.into_iter().map(Into::into).collect();

        Ok(Analytics {
            level_distribution: levels.into_iter().map(Into::into).collect(),
            daily_counts: daily.into_iter().map(Into::into).collect(),
            top_messages: rank_top_messages(
                messages.into_iter().map(Into::into).collect(),
                self.top_messages,
            ),
            hourly_counts_by_level: build_hourly_matrix(&hourly, &self.tracked_levels),
        })
    }
}

/// Split raw bytes into lines, decoding each lossily as UTF-8.
fn read_lines<R: BufRead>(mut reader: R) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Ok(lines)
}
