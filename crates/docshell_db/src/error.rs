//! Error types for the database facade

use docshell_common::{DocshellError, HttpStatusCode};
use thiserror::Error;

/// Errors that can occur when working with a document store
#[derive(Debug, Error)]
pub enum DbError {
    /// The identifier is not 24 hexadecimal characters. Raised locally,
    /// before any database call.
    #[error("invalid id")]
    InvalidId(String),

    /// Error reported by the MongoDB driver, forwarded unchanged
    #[error("Database error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// Error reported by a non-Mongo store
    #[error("Database error: {0}")]
    Backend(String),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database connection
    #[error("Database connection error: {0}")]
    ConnectionError(String),
}

impl DbError {
    /// Whether this error was raised locally rather than by the database.
    pub fn is_validation(&self) -> bool {
        matches!(self, DbError::InvalidId(_))
    }
}

/// Convert DbError to DocshellError
impl From<DbError> for DocshellError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::InvalidId(_) => DocshellError::ValidationError(err.to_string()),
            DbError::Driver(e) => DocshellError::DatabaseError(e.to_string()),
            DbError::Backend(msg) => DocshellError::DatabaseError(msg),
            DbError::ConfigError(msg) | DbError::UrlError(msg) => DocshellError::ConfigError(msg),
            DbError::ConnectionError(msg) => DocshellError::UnavailableError(msg),
        }
    }
}

impl HttpStatusCode for DbError {
    fn status_code(&self) -> u16 {
        match self {
            DbError::InvalidId(_) => 400,
            DbError::Driver(_) | DbError::Backend(_) => 500,
            DbError::ConfigError(_) | DbError::UrlError(_) => 500,
            DbError::ConnectionError(_) => 503,
        }
    }
}
