// --- File: crates/docshell_api/src/convert.rs ---
//! Conversion between request/response JSON and BSON documents.
//!
//! Documents go out as relaxed extended JSON, so ObjectIds render as
//! `{"$oid": "..."}` and dates as `{"$date": "..."}`. Incoming bodies are
//! parsed the same way, which lets clients send those forms back.

use docshell_common::{validation_error, DocshellError};
use docshell_db::bson::{Bson, Document};
use serde_json::Value;

/// Render a document as relaxed extended JSON
pub fn document_to_json(document: Document) -> Value {
    Bson::Document(document).into_relaxed_extjson()
}

/// Parse a request body into a document
///
/// # Errors
///
/// A validation error if the body is not a JSON object or holds malformed
/// extended JSON.
pub fn json_to_document(value: Value) -> Result<Document, DocshellError> {
    if !value.is_object() {
        return Err(validation_error("request body must be a JSON object"));
    }
    match Bson::try_from(value) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(_) => Err(validation_error("request body must be a JSON object")),
        Err(e) => Err(validation_error(format!("malformed document: {}", e))),
    }
}
