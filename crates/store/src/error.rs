use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection URL names a backend with no registered dialect.
    #[error("Unsupported store backend: {0}")]
    UnsupportedBackend(String),

    /// The pool could not open its first connection.
    #[error("Failed to connect to store: {0}")]
    Connection(#[source] sqlx::Error),

    /// A DDL or seed statement was rejected while preparing the schema.
    #[error("Schema initialization failed at '{statement}': {source}")]
    SchemaInit {
        statement: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// An insert succeeded but the backend handed back no generated key.
    #[error("Store did not report a generated id for {table}")]
    MissingGeneratedId { table: &'static str },

    /// A write touched a different number of rows than requested.
    #[error("Expected {expected} rows written to {table}, store reported {actual}")]
    RowCount {
        table: &'static str,
        expected: u64,
        actual: u64,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Returns true when the backend rejected a write on a foreign key.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                matches!(db_err.kind(), ErrorKind::ForeignKeyViolation)
            }
            _ => false,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
