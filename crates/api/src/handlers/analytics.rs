use axum::extract::{Query, State};
use axum::Json;
use logscope_core::analytics::Analytics;
use logscope_core::filters::non_empty;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /api/analytics`.
#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    /// Restrict every view to one source file.
    pub source_file: Option<String>,
}

/// GET /api/analytics
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> AppResult<Json<Analytics>> {
    let source_file = non_empty(params.source_file);
    let analytics = state.store.analytics(source_file.as_deref()).await?;
    Ok(Json(analytics))
}
