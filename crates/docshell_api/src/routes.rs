// --- File: crates/docshell_api/src/routes.rs ---

use crate::handlers::{
    create_document_handler, delete_document_handler, get_document_handler, health_handler,
    list_documents_handler, update_document_handler, ApiState,
};
use axum::{routing::get, Router};
use docshell_common::not_found;
use docshell_db::{CollectionFacade, DocumentStore};
use std::sync::Arc;

/// Creates a router containing the collection and health routes.
///
/// Paths are relative; the backend nests this router under `/api`.
pub fn routes<S>(facade: Arc<CollectionFacade<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    let state = ApiState { facade };

    Router::new()
        .route(
            "/collections/{name}",
            get(list_documents_handler::<S>).post(create_document_handler::<S>),
        )
        .route(
            "/collections/{name}/{id}",
            get(get_document_handler::<S>)
                .put(update_document_handler::<S>)
                .delete(delete_document_handler::<S>),
        )
        .route("/health", get(health_handler::<S>))
        // Unknown API paths answer in JSON instead of reaching the client shell
        .fallback(|| async { not_found("no such endpoint") })
        .with_state(state)
}
