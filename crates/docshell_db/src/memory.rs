//! In-process document store
//!
//! Keeps every collection as an insertion-ordered list of documents behind a
//! tokio `RwLock`. Used for local development (`memory://`) and by the test
//! suites, which read [`MemoryStore::operation_count`] to check whether a
//! call reached the store at all.

use crate::error::DbError;
use crate::store::{CollectionHandle, DeleteAck, DocumentStore, ReplaceAck};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

type Documents = Arc<RwLock<Vec<Document>>>;

/// In-memory document store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Documents>>>,
    operations: Arc<AtomicUsize>,
    closed: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store
    ///
    /// Collections are created on first use. Clones share the same
    /// collections and operation counter.
    ///
    /// # Returns
    ///
    /// A store with no collections
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations served so far, collection lookups included
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Whether [`DocumentStore::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

impl DocumentStore for MemoryStore {
    type Collection = MemoryCollection;

    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn collection(&self, name: &str) -> Result<MemoryCollection, DbError> {
        self.record();
        let mut collections = self.collections.write().await;
        let documents = collections
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Creating in-memory collection: {}", name);
                Arc::default()
            })
            .clone();

        Ok(MemoryCollection {
            name: name.to_string(),
            documents,
            operations: self.operations.clone(),
        })
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), DbError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// One in-memory collection
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    name: String,
    documents: Documents,
    operations: Arc<AtomicUsize>,
}

impl MemoryCollection {
    fn record(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

fn has_id(document: &Document, id: &Bson) -> bool {
    document.get("_id") == Some(id)
}

impl CollectionHandle for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find_all(&self) -> Result<Vec<Document>, DbError> {
        self.record();
        Ok(self.documents.read().await.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, DbError> {
        self.record();
        let id = Bson::ObjectId(id);
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| has_id(d, &id)).cloned())
    }

    async fn insert_one(&self, document: &Document) -> Result<Bson, DbError> {
        self.record();
        let mut stored = document.clone();
        let id = match stored.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                stored.insert("_id", id.clone());
                id
            }
        };

        let mut documents = self.documents.write().await;
        if documents.iter().any(|d| has_id(d, &id)) {
            return Err(DbError::Backend(format!(
                "E11000 duplicate key error collection: {} dup key: {{ _id: {} }}",
                self.name, id
            )));
        }
        documents.push(stored);
        Ok(id)
    }

    async fn replace_by_id(
        &self,
        id: ObjectId,
        document: &Document,
        upsert: bool,
    ) -> Result<ReplaceAck, DbError> {
        self.record();
        let id = Bson::ObjectId(id);
        let mut replacement = document.clone();
        replacement.insert("_id", id.clone());

        let mut documents = self.documents.write().await;
        match documents.iter_mut().find(|d| has_id(d, &id)) {
            Some(existing) => {
                let modified = *existing != replacement;
                *existing = replacement;
                Ok(ReplaceAck {
                    matched_count: 1,
                    modified_count: u64::from(modified),
                    upserted_id: None,
                })
            }
            None if upsert => {
                documents.push(replacement);
                Ok(ReplaceAck {
                    upserted_id: Some(id),
                    ..ReplaceAck::default()
                })
            }
            None => Ok(ReplaceAck::default()),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteAck, DbError> {
        self.record();
        let id = Bson::ObjectId(id);
        let mut documents = self.documents.write().await;
        let deleted_count = match documents.iter().position(|d| has_id(d, &id)) {
            Some(index) => {
                documents.remove(index);
                1
            }
            None => 0,
        };
        Ok(DeleteAck { deleted_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn insert_assigns_id_and_keeps_order() {
        let store = MemoryStore::new();
        let collection = store.collection("things").await.unwrap();

        let first = collection.insert_one(&doc! { "n": 1 }).await.unwrap();
        let second = collection.insert_one(&doc! { "n": 2 }).await.unwrap();
        assert!(matches!(first, Bson::ObjectId(_)));
        assert_ne!(first, second);

        let all = collection.find_all().await.unwrap();
        let ns: Vec<i32> = all.iter().map(|d| d.get_i32("n").unwrap()).collect();
        assert_eq!(ns, vec![1, 2]);
        assert_eq!(all[0].get("_id"), Some(&first));
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let store = MemoryStore::new();
        let collection = store.collection("things").await.unwrap();
        let id = ObjectId::new();

        collection.insert_one(&doc! { "_id": id }).await.unwrap();
        let err = collection.insert_one(&doc! { "_id": id }).await.unwrap_err();
        assert!(matches!(err, DbError::Backend(ref msg) if msg.contains("duplicate key")));
    }

    #[tokio::test]
    async fn handles_for_the_same_name_share_documents() {
        let store = MemoryStore::new();
        let a = store.collection("shared").await.unwrap();
        let b = store.collection("shared").await.unwrap();

        a.insert_one(&doc! { "x": true }).await.unwrap();
        assert_eq!(b.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replace_without_upsert_leaves_missing_documents_alone() {
        let store = MemoryStore::new();
        let collection = store.collection("things").await.unwrap();

        let ack = collection
            .replace_by_id(ObjectId::new(), &doc! { "n": 1 }, false)
            .await
            .unwrap();
        assert_eq!(ack, ReplaceAck::default());
        assert!(collection.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_reports_match_and_upsert() {
        let store = MemoryStore::new();
        let collection = store.collection("things").await.unwrap();
        let id = ObjectId::new();

        let ack = collection
            .replace_by_id(id, &doc! { "n": 1 }, true)
            .await
            .unwrap();
        assert_eq!(ack.upserted_id, Some(Bson::ObjectId(id)));

        let ack = collection
            .replace_by_id(id, &doc! { "n": 2 }, true)
            .await
            .unwrap();
        assert_eq!(ack.matched_count, 1);
        assert_eq!(ack.modified_count, 1);
        assert_eq!(
            collection.find_by_id(id).await.unwrap(),
            Some(doc! { "n": 2, "_id": id })
        );
    }

    #[tokio::test]
    async fn delete_removes_only_the_match() {
        let store = MemoryStore::new();
        let collection = store.collection("things").await.unwrap();
        let keep = collection.insert_one(&doc! { "n": 1 }).await.unwrap();
        let gone = collection.insert_one(&doc! { "n": 2 }).await.unwrap();

        let gone_id = gone.as_object_id().unwrap();
        assert_eq!(collection.delete_by_id(gone_id).await.unwrap().deleted_count, 1);
        assert_eq!(collection.delete_by_id(gone_id).await.unwrap().deleted_count, 0);

        let all = collection.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].get("_id"), Some(&keep));
    }

    #[tokio::test]
    async fn every_call_is_counted() {
        let store = MemoryStore::new();
        assert_eq!(store.operation_count(), 0);

        let collection = store.collection("things").await.unwrap();
        collection.find_all().await.unwrap();
        assert_eq!(store.operation_count(), 2);

        store.close().await.unwrap();
        assert!(store.is_closed());
    }
}
