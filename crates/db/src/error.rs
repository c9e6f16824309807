/// Failure of the underlying persistence layer.
///
/// Empty results are never errors; this type only covers faults of the
/// database or of reading the raw input.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
