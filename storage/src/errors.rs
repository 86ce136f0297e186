// storage/src/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database operation failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input or data: {0}")]
    InvalidData(String),
}
