//! Document database facade for Docshell
//!
//! This crate wraps a document database behind [`CollectionFacade`], which
//! offers list, get-by-id, save, update and delete over named collections.
//! Identifiers are checked locally before any database call; every other
//! outcome is the database's own.
//!
//! # Backends
//!
//! - MongoDB through the official driver ([`MongoStore`])
//! - An in-process store for development and tests ([`MemoryStore`])
//!
//! [`StoreFactory`] picks one from the configured URL.
//!
//! # Example
//!
//! ```rust,no_run
//! use docshell_db::bson::doc;
//! use docshell_db::{CollectionFacade, StoreFactory};
//!
//! async fn example() -> Result<(), docshell_db::DbError> {
//!     let store = StoreFactory::new().from_url("mongodb://localhost:27017/app").await?;
//!     let facade = CollectionFacade::new(store);
//!
//!     let saved = facade.save("notes", doc! { "title": "hello" }).await?;
//!     let all = facade.find_all("notes").await?;
//!     assert!(all.contains(&saved));
//!
//!     facade.shutdown().await
//! }
//! ```

pub mod error;
pub mod facade;
pub mod factory;
pub mod memory;
pub mod mongo;
pub mod object_id;
pub mod store;

// The driver's document model, re-exported so callers build documents with
// the same bson version the driver uses
pub use mongodb::bson;

pub use error::DbError;
pub use facade::{CollectionFacade, CREATED_AT, ID_FIELD, UPDATED_AT};
pub use factory::{AnyCollection, AnyStore, StoreFactory};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::{CollectionHandle, DeleteAck, DocumentStore, ReplaceAck};
