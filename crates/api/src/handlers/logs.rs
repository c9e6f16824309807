//! Handler for listing log entries with filters.

use axum::extract::{Query, State};
use axum::Json;
use logscope_core::filters::{non_empty, parse_date_bound, BoundKind};
use logscope_db::models::log_entry::{LogEntry, LogQuery};
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /api/logs`.
///
/// Empty strings are treated as absent, so a form that submits every field
/// only constrains the ones the user filled in.
#[derive(Debug, Default, Deserialize)]
pub struct LogFilterParams {
    pub level: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search: Option<String>,
    pub source_file: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl LogFilterParams {
    /// Convert raw query strings into a typed store query.
    ///
    /// Fails with a validation error if a date bound cannot be parsed.
    pub fn into_query(self) -> AppResult<LogQuery> {
        let start = non_empty(self.start_date)
            .map(|s| parse_date_bound(&s, BoundKind::Start))
            .transpose()?;
        let end = non_empty(self.end_date)
            .map(|s| parse_date_bound(&s, BoundKind::End))
            .transpose()?;

        Ok(LogQuery {
            source_file: non_empty(self.source_file),
            level: non_empty(self.level),
            start,
            end,
            search: non_empty(self.search),
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// GET /api/logs
pub async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<LogFilterParams>,
) -> AppResult<Json<Vec<LogEntry>>> {
    let query = params.into_query()?;
    tracing::debug!(?query, "Listing log entries");
    let entries = state.store.query(&query).await?;
    Ok(Json(entries))
}
