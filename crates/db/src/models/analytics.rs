//! Rows returned by the analytics aggregation queries.
//!
//! Each row converts into its `logscope_core::analytics` counterpart.

use chrono::NaiveDate;
use logscope_core::analytics::{
    DailyCount, HourlyLevelCount, LevelCount, MessageCount, HOURS_PER_DAY,
};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct LevelCountRow {
    pub level: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct DailyCountRow {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct MessageCountRow {
    pub message: String,
    pub count: i64,
}

/// Count for one `(date, hour, level)` combination that has entries.
#[derive(Debug, Clone, FromRow)]
pub struct HourlyLevelRow {
    pub date: NaiveDate,
    pub hour: i64,
    pub level: String,
    pub count: i64,
}

impl From<LevelCountRow> for LevelCount {
    fn from(row: LevelCountRow) -> Self {
        LevelCount {
            name: row.level,
            value: row.count,
        }
    }
}

impl From<DailyCountRow> for DailyCount {
    fn from(row: DailyCountRow) -> Self {
        DailyCount {
            date: row.date,
            count: row.count,
        }
    }
}

impl From<MessageCountRow> for MessageCount {
    fn from(row: MessageCountRow) -> Self {
        MessageCount {
            message: row.message,
            count: row.count,
        }
    }
}

impl From<HourlyLevelRow> for HourlyLevelCount {
    fn from(row: HourlyLevelRow) -> Self {
        HourlyLevelCount {
            date: row.date,
            // Out-of-range hours are dropped by the matrix builder.
            hour: u32::try_from(row.hour).unwrap_or(HOURS_PER_DAY),
            level: row.level,
            count: row.count,
        }
    }
}
