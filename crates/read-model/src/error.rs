//! Read model error types.

use store::StoreError;
use thiserror::Error;

/// Errors that can occur while assembling read models.
#[derive(Debug, Error)]
pub enum ReadModelError {
    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A stored timestamp could not be parsed.
    #[error("Malformed timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl From<sqlx::Error> for ReadModelError {
    fn from(err: sqlx::Error) -> Self {
        ReadModelError::Store(StoreError::Database(err))
    }
}

/// Result type for read model operations.
pub type Result<T> = std::result::Result<T, ReadModelError>;
