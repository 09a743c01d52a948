use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MovieRecord, TmdbSearchResponse},
    services::providers::MovieProvider,
};

/// TMDB search provider.
///
/// One `/search/movie` request per title; only the first result is used.
/// Like the generation client, it boots without a key and reports the
/// absence per request instead.
#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
        })
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn find_movie(&self, title: &str) -> AppResult<Option<MovieRecord>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::MissingConfiguration("TMDB API key not configured".to_string())
        })?;

        let url = format!("{}/search/movie", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("query", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "TMDB search failed");
            return Err(AppError::UpstreamLookup(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let search: TmdbSearchResponse = response.json().await?;
        let record = search.results.into_iter().next();

        tracing::debug!(
            query = %title,
            found = record.is_some(),
            provider = "tmdb",
            "Movie lookup completed"
        );

        Ok(record)
    }
}
