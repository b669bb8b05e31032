// --- File: crates/docshell_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{DocshellError, HttpStatusCode};

/// Extension trait for DocshellError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for DocshellError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("Request failed with {}: {}", status_code, self);
        }

        // Error bodies are always {"error": "<message>"}
        let body = Json(json!({ "error": self.to_string() }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for DocshellError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{not_found, validation_error};
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_renders_as_bad_request() {
        let response = validation_error("invalid id").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "invalid id" }));
    }

    #[tokio::test]
    async fn not_found_renders_as_404() {
        let response = not_found("document not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn server_errors_keep_their_message() {
        let response = DocshellError::DatabaseError("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Database error: boom" })
        );
    }

    #[tokio::test]
    async fn unavailable_renders_as_503() {
        let response = DocshellError::UnavailableError("down".into()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
