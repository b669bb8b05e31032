//! MongoDB store
//!
//! This module implements the store traits on top of the official MongoDB
//! driver. The driver owns connection pooling, timeouts and retries; this
//! layer only translates calls and results.

use crate::error::DbError;
use crate::store::{CollectionHandle, DeleteAck, DocumentStore, ReplaceAck};
use docshell_config::DatabaseConfig;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::{Client, Collection, Database};
use tracing::{debug, error, info};

/// Database used when neither the config nor the URL names one
pub const DEFAULT_DATABASE: &str = "docshell";

/// MongoDB-backed document store
///
/// Cloning is cheap: clones share the driver's connection pool.
#[derive(Debug, Clone)]
pub struct MongoStore {
    /// The driver client
    client: Client,
    /// The database all collections are resolved from
    database: Database,
}

impl MongoStore {
    /// Create a new store from a database configuration
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL is empty
    /// * The driver rejects the URL
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        if db_config.url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        Self::from_url(&db_config.url, db_config.name.as_deref()).await
    }

    /// Create a new store from a connection URL
    ///
    /// `database` overrides the default database named in the URL; when both
    /// are absent [`DEFAULT_DATABASE`] is used.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL is empty
    /// * The driver rejects the URL
    pub async fn from_url(db_url: &str, database: Option<&str>) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        debug!("Creating MongoDB client");
        let client = Client::with_uri_str(db_url).await.map_err(|e| {
            error!("Failed to create MongoDB client: {}", e);
            DbError::ConnectionError(e.to_string())
        })?;

        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        info!("MongoDB store ready for database: {}", database.name());
        Ok(Self { client, database })
    }

    /// The database collections are resolved from
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl DocumentStore for MongoStore {
    type Collection = MongoCollection;

    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn collection(&self, name: &str) -> Result<MongoCollection, DbError> {
        Ok(MongoCollection {
            inner: self.database.collection::<Document>(name),
        })
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), DbError> {
        self.client.clone().shutdown().await;
        Ok(())
    }
}

/// A MongoDB collection of untyped documents
#[derive(Debug, Clone)]
pub struct MongoCollection {
    inner: Collection<Document>,
}

impl CollectionHandle for MongoCollection {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn find_all(&self) -> Result<Vec<Document>, DbError> {
        let mut cursor = self.inner.find(doc! {}).await?;
        let mut documents = Vec::new();
        while cursor.advance().await? {
            documents.push(cursor.deserialize_current()?);
        }
        Ok(documents)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, DbError> {
        Ok(self.inner.find_one(doc! { "_id": id }).await?)
    }

    async fn insert_one(&self, document: &Document) -> Result<Bson, DbError> {
        let result = self.inner.insert_one(document).await?;
        Ok(result.inserted_id)
    }

    async fn replace_by_id(
        &self,
        id: ObjectId,
        document: &Document,
        upsert: bool,
    ) -> Result<ReplaceAck, DbError> {
        let result = self
            .inner
            .replace_one(doc! { "_id": id }, document)
            .upsert(upsert)
            .await?;
        Ok(ReplaceAck {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id,
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteAck, DbError> {
        let result = self.inner.delete_one(doc! { "_id": id }).await?;
        Ok(DeleteAck {
            deleted_count: result.deleted_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Client construction parses the URL but does not connect, so these run
    // without a server.

    #[tokio::test]
    async fn empty_url_is_rejected() {
        let err = MongoStore::from_url("", None).await.unwrap_err();
        assert!(matches!(err, DbError::UrlError(_)));
    }

    #[tokio::test]
    async fn empty_config_url_is_a_config_error() {
        let config = DatabaseConfig {
            url: String::new(),
            name: None,
        };
        let err = MongoStore::from_config(&config).await.unwrap_err();
        assert!(matches!(err, DbError::ConfigError(_)));
    }

    #[tokio::test]
    async fn database_name_falls_back_to_url_then_default() {
        let store = MongoStore::from_url("mongodb://localhost:27017/shop", None)
            .await
            .unwrap();
        assert_eq!(store.database().name(), "shop");

        let store = MongoStore::from_url("mongodb://localhost:27017", None)
            .await
            .unwrap();
        assert_eq!(store.database().name(), DEFAULT_DATABASE);

        let store = MongoStore::from_url("mongodb://localhost:27017/shop", Some("other"))
            .await
            .unwrap();
        assert_eq!(store.database().name(), "other");
    }

    #[tokio::test]
    async fn collection_handles_carry_their_name() {
        let store = MongoStore::from_url("mongodb://localhost:27017", None)
            .await
            .unwrap();
        let collection = store.collection("mycol").await.unwrap();
        assert_eq!(collection.name(), "mycol");
    }

    #[tokio::test]
    async fn malformed_url_is_a_connection_error() {
        let err = MongoStore::from_url("not-a-url", None).await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionError(_)));
    }
}
