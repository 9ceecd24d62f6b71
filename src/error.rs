//! Error types for Orchard.

use thiserror::Error;

/// Common error type for Orchard.
#[derive(Error, Debug)]
pub enum OrchardError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for OrchardError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                OrchardError::Conflict(db_err.message().to_string())
            }
            _ => OrchardError::Database(e.to_string()),
        }
    }
}

/// Result type alias for Orchard operations.
pub type Result<T> = std::result::Result<T, OrchardError>;
