//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat API and the static portfolio site share one Axum router: JSON
//! routes under `/api`, a health check, and a `ServeDir` fallback serving the
//! split-screen site at `/`.

pub mod chat;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat::post_chat))
        .route("/api/chat/history", get(chat::get_history))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Resolve the static site directory.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("website"))
}

/// Full application: API routes plus the portfolio site at `/`.
pub fn app(state: AppState) -> Router {
    let website_service = ServeDir::new(website_dir()).append_index_html_on_directories(true);
    api_routes(state)
        .fallback_service(website_service)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
