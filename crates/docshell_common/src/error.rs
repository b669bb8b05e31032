// --- File: crates/docshell_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all Docshell crates.
///
/// Crate-specific errors convert into this type with `From`, which is what
/// the HTTP layer renders.
#[derive(Error, Debug)]
pub enum DocshellError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("{0}")]
    ValidationError(String),

    /// Error reported by the database
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred due to a resource not being found
    #[error("{0}")]
    NotFoundError(String),

    /// The database is unreachable
    #[error("Service unavailable: {0}")]
    UnavailableError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for DocshellError {
    fn status_code(&self) -> u16 {
        match self {
            DocshellError::ConfigError(_) => 500,
            DocshellError::ValidationError(_) => 400,
            DocshellError::DatabaseError(_) => 500,
            DocshellError::NotFoundError(_) => 404,
            DocshellError::UnavailableError(_) => 503,
        }
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> DocshellError {
    DocshellError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> DocshellError {
    DocshellError::NotFoundError(message.to_string())
}
