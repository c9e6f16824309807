use std::sync::Arc;

use logscope_db::store::LogStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Log engine; owns the database pool.
    pub store: LogStore,
    /// Server configuration (upload directory, limits).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build the state from a pool, applying the analytics settings in `config`.
    pub fn new(pool: logscope_db::DbPool, config: ServerConfig) -> Self {
        let store = LogStore::new(pool)
            .with_tracked_levels(config.tracked_levels.clone())
            .with_top_messages(config.top_messages);
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
