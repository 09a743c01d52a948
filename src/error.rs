use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Generic message returned whenever failure detail must not leak to the
/// end user. Full detail is still logged server-side.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred during your request.";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// The generation service answered, but its text did not parse as an
    /// ordered list of titles. Distinct from upstream unavailability.
    #[error("Malformed generation output: {0}")]
    MalformedGeneration(String),

    /// Non-2xx from the generation service. Status and body are forwarded
    /// to the caller verbatim.
    #[error("Generation service returned status {status}")]
    UpstreamGeneration { status: u16, body: String },

    #[error("Metadata lookup failed: {0}")]
    UpstreamLookup(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MissingConfiguration(msg) => {
                tracing::error!(error = %self, "Service misconfigured");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::UpstreamGeneration { status, body } => {
                tracing::error!(status = %status, body = %body, "Generation service failure");
                let status = StatusCode::from_u16(*status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                // Forward the upstream error body verbatim when it is JSON,
                // matching what the upstream client would have seen directly.
                if let Ok(upstream) = serde_json::from_str::<serde_json::Value>(body) {
                    return (status, Json(upstream)).into_response();
                }
                (status, GENERIC_ERROR_MESSAGE.to_string())
            }
            AppError::MalformedGeneration(_)
            | AppError::UpstreamLookup(_)
            | AppError::HttpClient(_)
            | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": { "message": message }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_input_maps_to_400_with_message() {
        let response =
            AppError::InvalidInput("Please enter a valid input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["error"]["message"], "Please enter a valid input");
    }

    #[tokio::test]
    async fn test_missing_configuration_maps_to_500_with_fixed_message() {
        let response =
            AppError::MissingConfiguration("OpenAI API key not configured".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response_json(response).await;
        assert_eq!(body["error"]["message"], "OpenAI API key not configured");
    }

    #[tokio::test]
    async fn test_upstream_generation_forwards_status_and_json_body() {
        let response = AppError::UpstreamGeneration {
            status: 429,
            body: r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#.to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let body = response_json(response).await;
        assert_eq!(body["error"]["message"], "Rate limit reached");
        assert_eq!(body["error"]["type"], "requests");
    }

    #[tokio::test]
    async fn test_upstream_generation_with_non_json_body_stays_generic() {
        let response = AppError::UpstreamGeneration {
            status: 502,
            body: "<html>bad gateway</html>".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = response_json(response).await;
        assert_eq!(body["error"]["message"], GENERIC_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_lookup_and_parse_failures_stay_generic() {
        for error in [
            AppError::MalformedGeneration("not an array".to_string()),
            AppError::UpstreamLookup("TMDB returned status 401".to_string()),
            AppError::Internal("task join error".to_string()),
        ] {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = response_json(response).await;
            assert_eq!(body["error"]["message"], GENERIC_ERROR_MESSAGE);
        }
    }
}
