use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::MovieRecord, routes::AppState,
    services::suggestions,
};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Free-text movie description. A missing field behaves like an empty
    /// string and is rejected downstream.
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// One entry per generated candidate, in relevance order; `null` where
    /// the metadata service found no match.
    pub result: Vec<Option<MovieRecord>>,
}

/// Handler for the movie suggestion endpoint
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    tracing::info!(
        request_id = %request_id,
        input_chars = request.input.chars().count(),
        "Processing suggestion request"
    );

    let result = suggestions::suggest(
        state.generator.clone(),
        state.movies.clone(),
        &request.input,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        results = result.len(),
        "Suggestion request completed"
    );

    Ok(Json(GenerateResponse { result }))
}
