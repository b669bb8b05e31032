//! Entity identifier validation.
//!
//! Identifiers arrive as strings and must be exactly 24 hexadecimal
//! characters. The shape is checked with a regex before anything is sent to
//! the database.

use crate::error::DbError;
use mongodb::bson::oid::ObjectId;
use once_cell::sync::Lazy;
use regex::Regex;

static OBJECT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("ObjectId pattern must compile"));

/// Returns true if `id` has the shape of an ObjectId.
pub fn is_valid(id: &str) -> bool {
    OBJECT_ID_PATTERN.is_match(id)
}

/// Validates `id` and converts it into an ObjectId.
///
/// Upper-case hex digits are accepted; the resulting ObjectId always renders
/// in lower case.
pub fn parse(id: &str) -> Result<ObjectId, DbError> {
    if !is_valid(id) {
        return Err(DbError::InvalidId(id.to_string()));
    }
    ObjectId::parse_str(id).map_err(|_| DbError::InvalidId(id.to_string()))
}
