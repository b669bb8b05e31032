//! Docshell backend service
//!
//! Wires configuration, logging, the document store and the REST binding
//! together, and serves the single-page client next to the API.

pub mod app;

pub use app::build_app;
