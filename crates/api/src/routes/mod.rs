pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /upload                 upload a log file (POST, multipart)
/// /files                  list source file groups (GET)
/// /files/{filename}       delete a group and its raw file (DELETE)
/// /logs                   filtered entries (GET)
/// /analytics              aggregated views, optionally per file (GET)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(handlers::files::upload_file)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route("/files", get(handlers::files::list_files))
        .route("/files/{filename}", delete(handlers::files::delete_file))
        .route("/logs", get(handlers::logs::list_logs))
        .route("/analytics", get(handlers::analytics::get_analytics))
}
