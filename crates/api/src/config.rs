use std::path::PathBuf;

use logscope_core::analytics::DEFAULT_TOP_MESSAGES;
use logscope_core::levels::LevelSet;

/// Default upper bound on an uploaded log file (50 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// SQLite database URL (default: `sqlite://logs.db`).
    pub database_url: String,
    /// Directory where raw uploaded files are kept (default: `uploads`).
    pub upload_dir: PathBuf,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted upload body in bytes (default: 50 MiB).
    pub max_upload_bytes: usize,
    /// Levels always present in the hourly analytics matrix.
    pub tracked_levels: LevelSet,
    /// Number of entries in the top messages view (default: `5`).
    pub top_messages: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `0.0.0.0`                       |
    /// | `PORT`                 | `5000`                          |
    /// | `DATABASE_URL`         | `sqlite://logs.db`              |
    /// | `UPLOAD_DIR`           | `uploads`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                            |
    /// | `MAX_UPLOAD_BYTES`     | `52428800`                      |
    /// | `TRACKED_LEVELS`       | `INFO,ERROR,DEBUG,WARNING`      |
    /// | `TOP_MESSAGES_LIMIT`   | `5`                             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://logs.db".into());

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        );

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let tracked_levels = match std::env::var("TRACKED_LEVELS") {
            Ok(list) => LevelSet::parse_list(&list)
                .unwrap_or_else(|e| panic!("Invalid TRACKED_LEVELS '{list}': {e}")),
            Err(_) => LevelSet::default(),
        };

        let top_messages: usize = std::env::var("TOP_MESSAGES_LIMIT")
            .map(|v| v.parse().expect("TOP_MESSAGES_LIMIT must be a valid usize"))
            .unwrap_or(DEFAULT_TOP_MESSAGES);

        Self {
            host,
            port,
            database_url,
            upload_dir,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            tracked_levels,
            top_messages,
        }
    }
}
