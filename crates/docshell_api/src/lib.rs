//! REST binding for the Docshell collection facade
//!
//! # API Endpoints
//!
//! - `GET /collections/{name}` - list every document
//! - `POST /collections/{name}` - save a document (adds `created_at`)
//! - `GET /collections/{name}/{id}` - fetch one document
//! - `PUT /collections/{name}/{id}` - upsert a document (adds `updated_at`)
//! - `DELETE /collections/{name}/{id}` - remove a document
//! - `GET /health` - database ping
//!
//! Errors come back as `{"error": "<message>"}`: an id that is not 24 hex
//! characters is a 400 with `invalid id`, a missing document a 404, and a
//! database failure a 500.

pub mod convert;
pub mod handlers;
pub mod routes;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;
