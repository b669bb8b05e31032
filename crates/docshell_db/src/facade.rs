//! Collection facade
//!
//! [`CollectionFacade`] wraps one open store and exposes CRUD over named
//! collections. Each call resolves its collection afresh, forwards to the
//! store, and returns the store's result or error unchanged. The only logic
//! of its own is identifier validation and the timestamp fields stamped on
//! writes.

use crate::error::DbError;
use crate::object_id;
use crate::store::{CollectionHandle, DeleteAck, DocumentStore};
use chrono::Utc;
use mongodb::bson::{self, Bson, Document};
use tracing::{debug, error, info};

/// Identifier field of every document
pub const ID_FIELD: &str = "_id";
/// Set by [`CollectionFacade::save`]
pub const CREATED_AT: &str = "created_at";
/// Set by [`CollectionFacade::update`]
pub const UPDATED_AT: &str = "updated_at";

fn now() -> bson::DateTime {
    bson::DateTime::from_millis(Utc::now().timestamp_millis())
}

fn forward<T>(result: Result<T, DbError>, operation: &str, name: &str) -> Result<T, DbError> {
    result.map_err(|e| {
        error!("{} on collection {} failed: {}", operation, name, e);
        e
    })
}

/// CRUD facade over a document store
///
/// The facade holds no state besides the store handle, so it can be shared
/// behind an `Arc` and called concurrently.
#[derive(Debug, Clone)]
pub struct CollectionFacade<S> {
    store: S,
}

impl<S: DocumentStore> CollectionFacade<S> {
    /// Create a facade over an open store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the named collection
    ///
    /// Nothing is cached; two calls with the same name resolve two handles.
    pub async fn get_collection(&self, name: &str) -> Result<S::Collection, DbError> {
        debug!("Resolving collection {} on {}", name, self.store.backend());
        forward(self.store.collection(name).await, "resolve", name)
    }

    /// Every document in the collection, in store order
    ///
    /// An empty or missing collection yields an empty vector.
    pub async fn find_all(&self, name: &str) -> Result<Vec<Document>, DbError> {
        let collection = self.get_collection(name).await?;
        let documents = forward(collection.find_all().await, "find_all", name)?;
        debug!("Found {} documents in {}", documents.len(), name);
        Ok(documents)
    }

    /// The document with identifier `id`, or `None`
    ///
    /// # Arguments
    ///
    /// * `name` - The collection name
    /// * `id` - The document identifier, 24 hexadecimal characters
    ///
    /// # Errors
    ///
    /// [`DbError::InvalidId`] if `id` is not 24 hex characters; the store is
    /// not contacted in that case.
    pub async fn get(&self, name: &str, id: &str) -> Result<Option<Document>, DbError> {
        let oid = object_id::parse(id).inspect_err(|_| {
            debug!("Rejected invalid id {:?} for collection {}", id, name);
        })?;

        let collection = self.get_collection(name).await?;
        forward(collection.find_by_id(oid).await, "get", name)
    }

    /// Stamp `created_at` on the document and insert it
    ///
    /// # Arguments
    ///
    /// * `name` - The collection name
    /// * `document` - The document to insert
    ///
    /// # Returns
    ///
    /// The stamped document carrying the `_id` it was stored under
    ///
    /// # Errors
    ///
    /// Insert failures are returned to the caller unchanged.
    pub async fn save(&self, name: &str, mut document: Document) -> Result<Document, DbError> {
        document.insert(CREATED_AT, now());

        let collection = self.get_collection(name).await?;
        let id = forward(collection.insert_one(&document).await, "save", name)?;
        if !document.contains_key(ID_FIELD) {
            document.insert(ID_FIELD, id);
        }

        debug!("Saved document {} in {}", display_id(&document), name);
        Ok(document)
    }

    /// Set `_id` to `id`, stamp `updated_at`, and upsert the document
    ///
    /// # Arguments
    ///
    /// * `name` - The collection name
    /// * `document` - The replacement; any `_id` it carries is overwritten
    /// * `id` - The document identifier, 24 hexadecimal characters
    ///
    /// # Returns
    ///
    /// The document as written
    ///
    /// # Errors
    ///
    /// [`DbError::InvalidId`] if `id` is not 24 hex characters; the store is
    /// not contacted in that case.
    pub async fn update(
        &self,
        name: &str,
        mut document: Document,
        id: &str,
    ) -> Result<Document, DbError> {
        let oid = object_id::parse(id)?;
        document.insert(ID_FIELD, oid);
        document.insert(UPDATED_AT, now());

        let collection = self.get_collection(name).await?;
        let ack = forward(
            collection.replace_by_id(oid, &document, true).await,
            "update",
            name,
        )?;

        debug!(
            "Updated document {} in {} (matched {}, upserted {})",
            oid,
            name,
            ack.matched_count,
            ack.upserted_id.is_some()
        );
        Ok(document)
    }

    /// Remove the document with identifier `id`
    ///
    /// # Returns
    ///
    /// The store's acknowledgment; `deleted_count` is 0 when nothing matched
    ///
    /// # Errors
    ///
    /// [`DbError::InvalidId`] if `id` is not 24 hex characters; the store is
    /// not contacted in that case.
    pub async fn delete(&self, name: &str, id: &str) -> Result<DeleteAck, DbError> {
        let oid = object_id::parse(id)?;

        let collection = self.get_collection(name).await?;
        let ack = forward(collection.delete_by_id(oid).await, "delete", name)?;
        debug!("Deleted {} document(s) with id {} from {}", ack.deleted_count, oid, name);
        Ok(ack)
    }

    /// Whether the store answers a ping
    pub async fn is_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    /// Close the underlying store
    ///
    /// Calls made after shutdown are not rejected by the facade; what happens
    /// to them is up to the store.
    pub async fn shutdown(&self) -> Result<(), DbError> {
        self.store.close().await?;
        info!("Closed {} database connection", self.store.backend());
        Ok(())
    }
}

fn display_id(document: &Document) -> String {
    match document.get(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => "<none>".to_string(),
    }
}
