use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::Searcher,
};

pub mod titles;

/// Shared state handed to every handler
pub struct AppState {
    pub searcher: Arc<dyn Searcher>,
    /// Deadline for one search call, covering every provider page it fetches
    pub search_timeout: Duration,
    pub default_limit: i64,
}

impl AppState {
    pub fn new(searcher: Arc<dyn Searcher>, config: &Config) -> Self {
        Self {
            searcher,
            search_timeout: Duration::from_secs(config.search_timeout_secs),
            default_limit: config.search_default_limit,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/titles/search", get(titles::search))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
