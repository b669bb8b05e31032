//! Factory for creating document stores
//!
//! The backend is picked from the URL scheme: `mongodb://` and
//! `mongodb+srv://` open a [`MongoStore`], `memory://` an empty
//! [`MemoryStore`]. Either way the caller gets an [`AnyStore`], so code
//! above this layer does not need to know which one it is talking to.

use crate::error::DbError;
use crate::memory::{MemoryCollection, MemoryStore};
use crate::mongo::{MongoCollection, MongoStore};
use crate::store::{CollectionHandle, DeleteAck, DocumentStore, ReplaceAck};
use docshell_config::{AppConfig, DatabaseConfig};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tracing::debug;

/// A store chosen at runtime
#[derive(Debug, Clone)]
pub enum AnyStore {
    Mongo(MongoStore),
    Memory(MemoryStore),
}

/// A collection handle from an [`AnyStore`]
#[derive(Debug, Clone)]
pub enum AnyCollection {
    Mongo(MongoCollection),
    Memory(MemoryCollection),
}

impl DocumentStore for AnyStore {
    type Collection = AnyCollection;

    fn backend(&self) -> &'static str {
        match self {
            AnyStore::Mongo(store) => store.backend(),
            AnyStore::Memory(store) => store.backend(),
        }
    }

    async fn collection(&self, name: &str) -> Result<AnyCollection, DbError> {
        match self {
            AnyStore::Mongo(store) => store.collection(name).await.map(AnyCollection::Mongo),
            AnyStore::Memory(store) => store.collection(name).await.map(AnyCollection::Memory),
        }
    }

    async fn ping(&self) -> Result<(), DbError> {
        match self {
            AnyStore::Mongo(store) => store.ping().await,
            AnyStore::Memory(store) => store.ping().await,
        }
    }

    async fn close(&self) -> Result<(), DbError> {
        match self {
            AnyStore::Mongo(store) => store.close().await,
            AnyStore::Memory(store) => store.close().await,
        }
    }
}

impl CollectionHandle for AnyCollection {
    fn name(&self) -> &str {
        match self {
            AnyCollection::Mongo(c) => c.name(),
            AnyCollection::Memory(c) => c.name(),
        }
    }

    async fn find_all(&self) -> Result<Vec<Document>, DbError> {
        match self {
            AnyCollection::Mongo(c) => c.find_all().await,
            AnyCollection::Memory(c) => c.find_all().await,
        }
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, DbError> {
        match self {
            AnyCollection::Mongo(c) => c.find_by_id(id).await,
            AnyCollection::Memory(c) => c.find_by_id(id).await,
        }
    }

    async fn insert_one(&self, document: &Document) -> Result<Bson, DbError> {
        match self {
            AnyCollection::Mongo(c) => c.insert_one(document).await,
            AnyCollection::Memory(c) => c.insert_one(document).await,
        }
    }

    async fn replace_by_id(
        &self,
        id: ObjectId,
        document: &Document,
        upsert: bool,
    ) -> Result<ReplaceAck, DbError> {
        match self {
            AnyCollection::Mongo(c) => c.replace_by_id(id, document, upsert).await,
            AnyCollection::Memory(c) => c.replace_by_id(id, document, upsert).await,
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteAck, DbError> {
        match self {
            AnyCollection::Mongo(c) => c.delete_by_id(id).await,
            AnyCollection::Memory(c) => c.delete_by_id(id).await,
        }
    }
}

/// Factory for creating document stores
#[derive(Debug, Clone, Default)]
pub struct StoreFactory;

impl StoreFactory {
    /// Create a new store factory
    ///
    /// # Returns
    ///
    /// A new store factory
    pub fn new() -> Self {
        Self
    }

    /// Create a store from an application configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The application configuration; its `database` section
    ///   picks the backend
    ///
    /// # Returns
    ///
    /// A store for the configured backend
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    ///
    /// * The database configuration is missing
    /// * The database URL is empty or has an unsupported scheme
    /// * The driver rejects the URL
    pub async fn from_app_config(&self, config: &AppConfig) -> Result<AnyStore, DbError> {
        debug!("Creating store from application configuration");

        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        self.from_db_config(db_config).await
    }

    /// Create a store from a database configuration
    ///
    /// The URL scheme picks the backend. A configured `name` overrides the
    /// database named in a MongoDB URL.
    ///
    /// # Arguments
    ///
    /// * `db_config` - The database configuration
    ///
    /// # Returns
    ///
    /// A store for the configured backend
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    ///
    /// * The database URL is empty
    /// * The URL scheme is neither `mongodb`, `mongodb+srv` nor `memory`
    /// * The driver rejects the URL
    pub async fn from_db_config(&self, db_config: &DatabaseConfig) -> Result<AnyStore, DbError> {
        if db_config.url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }
        self.open(&db_config.url, db_config.name.as_deref()).await
    }

    /// Create a store from a URL, using the database named in it
    ///
    /// # Arguments
    ///
    /// * `db_url` - A `mongodb://`, `mongodb+srv://` or `memory://` URL
    ///
    /// # Returns
    ///
    /// A store for the backend the URL names
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    ///
    /// * The URL is empty or has an unsupported scheme
    /// * The driver rejects the URL
    pub async fn from_url(&self, db_url: &str) -> Result<AnyStore, DbError> {
        self.open(db_url, None).await
    }

    async fn open(&self, db_url: &str, database: Option<&str>) -> Result<AnyStore, DbError> {
        if is_memory_url(db_url) {
            debug!("Using in-memory store");
            return Ok(AnyStore::Memory(MemoryStore::new()));
        }
        if db_url.starts_with("mongodb://") || db_url.starts_with("mongodb+srv://") {
            return MongoStore::from_url(db_url, database).await.map(AnyStore::Mongo);
        }
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }
        Err(DbError::UrlError(format!(
            "Unsupported database URL scheme: {}",
            db_url.split(':').next().unwrap_or(db_url)
        )))
    }
}

fn is_memory_url(db_url: &str) -> bool {
    db_url == "memory:" || db_url.starts_with("memory://")
}
