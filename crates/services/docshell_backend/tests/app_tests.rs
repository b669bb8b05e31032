use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use docshell_backend::build_app;
use docshell_config::{AppConfig, WebConfig};
use docshell_db::{CollectionFacade, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn fixture_web() -> WebConfig {
    WebConfig {
        dir: format!("{}/tests/fixtures/web", env!("CARGO_MANIFEST_DIR")),
        index: "index.html".to_string(),
    }
}

fn create_app(web: Option<WebConfig>) -> Router {
    let config = AppConfig {
        web,
        ..AppConfig::default()
    };
    let facade = Arc::new(CollectionFacade::new(MemoryStore::new()));
    build_app(&config, facade)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_api_is_nested_under_prefix() {
    let app = create_app(Some(fixture_web()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/collections/notes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "title": "hello" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (status, body) = get(&app, "/api/collections/notes").await;
    assert_eq!(status, StatusCode::OK);
    let listed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["title"], "hello");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_app(None);

    let (status, body) = get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({ "status": "ok", "backend": "memory" }));
}

#[tokio::test]
async fn test_unknown_api_path_does_not_reach_client_shell() {
    let app = create_app(Some(fixture_web()));

    let (status, body) = get(&app, "/api/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({ "error": "no such endpoint" }));
}

#[tokio::test]
async fn test_client_route_serves_index() {
    let app = create_app(Some(fixture_web()));

    let (status, body) = get(&app, "/some/client/route").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<div id=\"app\"></div>"));
}

#[tokio::test]
async fn test_root_serves_index() {
    let app = create_app(Some(fixture_web()));

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Docshell</title>"));
}

#[tokio::test]
async fn test_static_asset_is_served() {
    let app = create_app(Some(fixture_web()));

    let (status, body) = get(&app, "/assets/app.js").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("console.log"));
}

#[tokio::test]
async fn test_without_web_bundle_other_paths_are_not_found() {
    let app = create_app(None);

    let (status, _) = get(&app, "/some/client/route").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
