use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::generation::{build_prompt, parse_title_array, TitleGenerator},
};

// Sampling parameters for short structured output. Tuning choices, not
// part of the endpoint contract.
const TEMPERATURE: f32 = 0.6;
const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

/// OpenAI completions client.
///
/// Constructed once at startup and injected into the router state. The API
/// key is optional so the service can boot without one; its absence is
/// reported per request before any outbound call.
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.openai_api_key.clone(),
            api_url: config.openai_api_url.clone(),
            model: config.completion_model.clone(),
        })
    }
}

#[async_trait::async_trait]
impl TitleGenerator for OpenAiClient {
    async fn generate_titles(&self, input: &str) -> AppResult<Vec<String>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::MissingConfiguration("OpenAI API key not configured".to_string())
        })?;

        let url = format!("{}/v1/completions", self.api_url);
        let request = CompletionRequest {
            model: &self.model,
            prompt: build_prompt(input),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status, body = %body, "Completion request failed");
            return Err(AppError::UpstreamGeneration { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| {
                AppError::MalformedGeneration("completion contained no choices".to_string())
            })?;

        let titles = parse_title_array(&text).map_err(|e| {
            tracing::error!(error = %e, text = %text, "Completion text is not a title array");
            AppError::MalformedGeneration(e.to_string())
        })?;

        tracing::info!(
            titles = titles.len(),
            model = %self.model,
            "Title generation completed"
        );

        Ok(titles)
    }
}
