//! Typed response bodies for API handlers.
//!
//! Listing and analytics endpoints serialize the engine types directly; the
//! mutating endpoints answer with one of these.

use serde::Serialize;

/// Body of a successful `POST /api/upload`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    /// Sanitized name the entries were ingested under.
    pub filename: String,
    pub entries_added: u64,
}

/// Body of a successful `DELETE /api/files/{filename}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub entries_deleted: u64,
}
