// --- File: crates/docshell_api/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docshell_common::{not_found, validation_error, DocshellError};
use docshell_db::{CollectionFacade, DeleteAck, DocumentStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::convert::{document_to_json, json_to_document};

// --- State for collection handlers ---
pub struct ApiState<S> {
    pub facade: Arc<CollectionFacade<S>>,
}

// Manual impl: a derive would require S: Clone
impl<S> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            facade: self.facade.clone(),
        }
    }
}

type Shared<S> = State<ApiState<S>>;

fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, DocshellError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| validation_error(rejection.body_text()))
}

/// GET /collections/{name}
pub async fn list_documents_handler<S: DocumentStore + 'static>(
    State(state): Shared<S>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Value>>, DocshellError> {
    let documents = state.facade.find_all(&name).await?;
    Ok(Json(documents.into_iter().map(document_to_json).collect()))
}

/// POST /collections/{name}
pub async fn create_document_handler<S: DocumentStore + 'static>(
    State(state): Shared<S>,
    Path(name): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, DocshellError> {
    let document = json_to_document(body(payload)?)?;
    let saved = state.facade.save(&name, document).await?;
    Ok((StatusCode::CREATED, Json(document_to_json(saved))).into_response())
}

/// GET /collections/{name}/{id}
pub async fn get_document_handler<S: DocumentStore + 'static>(
    State(state): Shared<S>,
    Path((name, id)): Path<(String, String)>,
) -> Result<Json<Value>, DocshellError> {
    match state.facade.get(&name, &id).await? {
        Some(document) => Ok(Json(document_to_json(document))),
        None => {
            debug!("No document {} in {}", id, name);
            Err(not_found("document not found"))
        }
    }
}

/// PUT /collections/{name}/{id}
pub async fn update_document_handler<S: DocumentStore + 'static>(
    State(state): Shared<S>,
    Path((name, id)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, DocshellError> {
    let document = json_to_document(body(payload)?)?;
    let updated = state.facade.update(&name, document, &id).await?;
    Ok(Json(document_to_json(updated)))
}

/// DELETE /collections/{name}/{id}
pub async fn delete_document_handler<S: DocumentStore + 'static>(
    State(state): Shared<S>,
    Path((name, id)): Path<(String, String)>,
) -> Result<Json<DeleteAck>, DocshellError> {
    Ok(Json(state.facade.delete(&name, &id).await?))
}

/// GET /health
pub async fn health_handler<S: DocumentStore + 'static>(
    State(state): Shared<S>,
) -> Result<Json<Value>, DocshellError> {
    let backend = state.facade.store().backend();
    if state.facade.is_healthy().await {
        Ok(Json(json!({ "status": "ok", "backend": backend })))
    } else {
        Err(DocshellError::UnavailableError(format!(
            "{} database is not answering",
            backend
        )))
    }
}
