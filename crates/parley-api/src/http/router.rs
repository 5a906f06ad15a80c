//! Axum router configuration with middleware.
//!
//! Routes are mounted at the root (no version prefix) to match the chat
//! page's fetch paths. Middleware: CORS, request tracing.
//!
//! The bundled chat page is served from `web/` (configurable via
//! `PARLEY_WEB_DIR`). API routes take priority; unknown paths fall through
//! to `index.html`. If the directory does not exist, only the API is
//! served.

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/upload_file", post(handlers::upload::upload_file))
        .route("/execute_code", post(handlers::execute::execute_code))
        .route("/health", get(health_check))
        .route("/favicon.ico", get(favicon))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the chat page from disk if the directory exists. API routes
    // take priority; unknown paths fall through to index.html.
    let web_dir = std::env::var("PARLEY_WEB_DIR").unwrap_or_else(|_| "web".to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "static file serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /favicon.ico - empty response so browsers stop asking.
async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
