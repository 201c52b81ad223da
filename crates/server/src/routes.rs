//! HTTP route definitions.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::summarize_form))
        .route("/api/summary", post(handlers::api_summary))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
