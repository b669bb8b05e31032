//! Store traits for document database access
//!
//! These traits are the seam between the collection facade and a concrete
//! driver. The facade only ever talks to a [`DocumentStore`] and the
//! [`CollectionHandle`]s it hands out, so the same facade runs against
//! MongoDB or the in-process memory store.

use crate::error::DbError;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Acknowledgment returned by a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    /// Number of documents removed (0 or 1)
    pub deleted_count: u64,
}

/// Acknowledgment returned by a replace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplaceAck {
    /// Number of documents that matched the identifier
    pub matched_count: u64,
    /// Number of documents that were changed
    pub modified_count: u64,
    /// Identifier of the inserted document when the replace upserted
    pub upserted_id: Option<Bson>,
}

/// A handle to an open document database.
///
/// Implementations must be safe to share across tasks; the facade holds one
/// store and issues concurrent calls against it without synchronization.
pub trait DocumentStore: Send + Sync {
    /// The collection handle type this store hands out
    type Collection: CollectionHandle;

    /// A short name for the backend, used in log lines
    fn backend(&self) -> &'static str;

    /// Resolve a named collection
    ///
    /// Each call resolves a fresh handle; nothing is cached between calls.
    fn collection(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Self::Collection, DbError>> + Send;

    /// Check that the database answers
    fn ping(&self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Close the underlying connection
    fn close(&self) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// A handle to one named collection.
pub trait CollectionHandle: Send + Sync {
    /// The collection name
    fn name(&self) -> &str;

    /// Every document in the collection, in the store's natural order
    fn find_all(&self) -> impl Future<Output = Result<Vec<Document>, DbError>> + Send;

    /// The document whose `_id` equals `id`, or `None`
    fn find_by_id(
        &self,
        id: ObjectId,
    ) -> impl Future<Output = Result<Option<Document>, DbError>> + Send;

    /// Insert a document and return the `_id` it was stored under
    fn insert_one(&self, document: &Document)
        -> impl Future<Output = Result<Bson, DbError>> + Send;

    /// Replace the document whose `_id` equals `id`, inserting it when
    /// `upsert` is set and no document matches
    fn replace_by_id(
        &self,
        id: ObjectId,
        document: &Document,
        upsert: bool,
    ) -> impl Future<Output = Result<ReplaceAck, DbError>> + Send;

    /// Remove the document whose `_id` equals `id`
    fn delete_by_id(&self, id: ObjectId) -> impl Future<Output = Result<DeleteAck, DbError>> + Send;
}
