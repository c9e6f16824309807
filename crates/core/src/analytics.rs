//! Chart-ready analytics views over log entries.
//!
//! The database computes sparse grouped counts; this module turns them into
//! the shapes the dashboard consumes. The interesting part is the hourly
//! matrix, which must be dense: every date gets all 24 hours and every hour
//! carries every known level, zero-filled.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::levels::LevelSet;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of hour buckets per date in the hourly matrix.
pub const HOURS_PER_DAY: u32 = 24;

/// Default number of entries in the top messages view.
pub const DEFAULT_TOP_MESSAGES: usize = 5;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// Number of entries for one level (`{name, value}` for pie charts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub name: String,
    pub value: i64,
}

/// Number of entries on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Number of entries sharing one exact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageCount {
    pub message: String,
    pub count: i64,
}

/// One sparse `(date, hour, level)` cell as produced by a grouped count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyLevelCount {
    pub date: NaiveDate,
    pub hour: u32,
    pub level: String,
    pub count: i64,
}

/// One hour of one date: `{"hour": 10, "INFO": 1, "ERROR": 0, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    #[serde(flatten)]
    pub counts: BTreeMap<String, i64>,
}

impl HourBucket {
    /// Count for `level` in this hour (zero if the level is unknown).
    pub fn count(&self, level: &str) -> i64 {
        self.counts.get(level).copied().unwrap_or(0)
    }

    /// Sum over all levels in this hour.
    pub fn total(&self) -> i64 {
        self.counts.values().sum()
    }
}

/// Dense per-date hourly matrix, keyed by date in ascending order.
pub type HourlyMatrix = BTreeMap<NaiveDate, Vec<HourBucket>>;

/// The four analytics views bundled for the dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analytics {
    pub level_distribution: Vec<LevelCount>,
    pub daily_counts: Vec<DailyCount>,
    pub top_messages: Vec<MessageCount>,
    pub hourly_counts_by_level: HourlyMatrix,
}

impl Analytics {
    /// Total number of entries in scope, derived from the level distribution.
    pub fn total(&self) -> i64 {
        self.level_distribution.iter().map(|l| l.value).sum()
    }
}

// ---------------------------------------------------------------------------
// Shaping
// ---------------------------------------------------------------------------

/// Order message counts by count descending, then message ascending, and
/// keep the first `limit`.
///
/// The message tie-break makes the result independent of row order.
pub fn rank_top_messages(mut counts: Vec<MessageCount>, limit: usize) -> Vec<MessageCount> {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.message.cmp(&b.message)));
    counts.truncate(limit);
    counts
}

/// Materialize the dense hourly matrix from sparse grouped counts.
///
/// Every date that appears in `cells` gets exactly [`HOURS_PER_DAY`] buckets.
/// Each bucket carries every level of `tracked` plus every other level seen
/// anywhere in `cells`, zero where nothing was counted. Cells with an hour
/// outside `0..24` are ignored.
pub fn build_hourly_matrix(cells: &[HourlyLevelCount], tracked: &LevelSet) -> HourlyMatrix {
    let mut levels: BTreeSet<&str> = tracked.iter().collect();
    levels.extend(cells.iter().map(|c| c.level.as_str()));

    let empty_bucket = |hour: u32| HourBucket {
        hour,
        counts: levels.iter().map(|l| (l.to_string(), 0)).collect(),
    };

    let mut matrix = HourlyMatrix::new();
    for cell in cells {
        if cell.hour >= HOURS_PER_DAY {
            continue;
        }
        let hours = matrix
            .entry(cell.date)
            .or_insert_with(|| (0..HOURS_PER_DAY).map(empty_bucket).collect());
        *hours[cell.hour as usize]
            .counts
            .entry(cell.level.clone())
            .or_insert(0) += cell.count;
    }

    matrix
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
