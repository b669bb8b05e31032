// --- File: crates/docshell_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP error rendering
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{not_found, validation_error, DocshellError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::IntoHttpResponse;

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};
