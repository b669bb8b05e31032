// File: services/docshell_backend/src/app.rs
use axum::Router;
use docshell_config::{AppConfig, WebConfig};
use docshell_db::{CollectionFacade, DocumentStore};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Assemble the application router.
///
/// The REST API lives under `/api`. When a web bundle is configured, every
/// other path is served from it, falling back to the index page so that
/// client-side routes load the shell.
pub fn build_app<S>(config: &AppConfig, facade: Arc<CollectionFacade<S>>) -> Router
where
    S: DocumentStore + 'static,
{
    let mut app = Router::new().nest("/api", docshell_api::routes(facade));

    if let Some(web) = config.web.as_ref() {
        app = app.fallback_service(client_shell(web));
    } else {
        info!("No web bundle configured; serving the API only");
    }

    app.layer(TraceLayer::new_for_http())
}

/// Static file service for the single-page client.
pub fn client_shell(web: &WebConfig) -> ServeDir<ServeFile> {
    let dir = Path::new(&web.dir);
    let index = dir.join(&web.index);
    if !index.exists() {
        warn!("Client index {} does not exist", index.display());
    }
    info!("Serving client shell from {}", dir.display());

    ServeDir::new(dir).fallback(ServeFile::new(index))
}
