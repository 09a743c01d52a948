use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{generation::TitleGenerator, providers::MovieProvider},
};

pub mod generate;

/// Shared application state: the two outbound clients, constructed at
/// startup and injected so handlers stay testable with substitutes.
pub struct AppState {
    pub generator: Arc<dyn TitleGenerator>,
    pub movies: Arc<dyn MovieProvider>,
}

/// Creates the application router with all routes.
///
/// CORS is permissive so the separately-hosted single-page UI can call the
/// API directly.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api
fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate", post(generate::generate))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
