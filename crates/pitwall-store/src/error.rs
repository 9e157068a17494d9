use thiserror::Error;

/// Errors from the persistence layer. Callers must not assume partial
/// writes — every operation either completed or changed nothing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
