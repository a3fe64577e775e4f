pub use crate::visualize::visualize_handler;

use crate::page;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub async fn index_handler() -> impl IntoResponse {
    Html(page::index_page())
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.max_request_body_bytes;
    Router::new()
        .route("/", get(index_handler))
        .route("/visualize", post(visualize_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
