//! Handlers for uploading, listing and deleting log files.
//!
//! A "file" is a source group in the store. The raw upload is kept under the
//! configured upload directory next to the parsed entries.

use std::path::Path as FsPath;

use axum::extract::{Multipart, Path, State};
use axum::Json;
use logscope_core::upload::{is_allowed_file, sanitize_filename, upload_message};
use logscope_db::models::log_entry::SourceFileSummary;

use crate::error::{AppError, AppResult};
use crate::response::{DeleteResponse, UploadResponse};
use crate::state::AppState;

/// POST /api/upload
///
/// Accepts a multipart form with a required `file` field. The file is stored
/// under its sanitized name and every parseable line is ingested into the
/// group of that name. Re-uploading a name appends to the existing group.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("No file part".into()))?;

    if filename.is_empty() {
        return Err(AppError::BadRequest("No selected file".into()));
    }

    let filename = sanitize_filename(&filename)
        .filter(|name| is_allowed_file(name))
        .ok_or_else(|| AppError::BadRequest("Invalid file type".into()))?;

    let upload_dir = &state.config.upload_dir;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    tokio::fs::write(upload_dir.join(&filename), &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let entries_added = state.store.ingest_reader(&filename, data.as_slice()).await?;

    Ok(Json(UploadResponse {
        message: upload_message(entries_added),
        filename,
        entries_added,
    }))
}

/// GET /api/files
pub async fn list_files(State(state): State<AppState>) -> AppResult<Json<Vec<SourceFileSummary>>> {
    let files = state.store.list_source_files().await?;
    Ok(Json(files))
}

/// DELETE /api/files/{filename}
///
/// Removes every entry of the group and the retained raw upload, if any.
/// Deleting an unknown file succeeds with `entries_deleted: 0`.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let entries_deleted = state.store.delete_group(&filename).await?;

    // Uploads are stored under their sanitized name, so any other name
    // cannot own a raw file.
    if sanitize_filename(&filename).as_deref() == Some(filename.as_str()) {
        remove_raw_file(&state.config.upload_dir.join(&filename)).await;
    }

    Ok(Json(DeleteResponse {
        message: format!("File {filename} deleted."),
        entries_deleted,
    }))
}

/// Best-effort removal of a stored upload. The entries are already gone, so
/// a failure here is logged rather than reported.
async fn remove_raw_file(path: &FsPath) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed raw upload"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove raw upload");
        }
    }
}
