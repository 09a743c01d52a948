use serde::{Deserialize, Serialize};

/// Enriched metadata for a single movie, as returned by the TMDB search API
/// and forwarded to the client unchanged.
///
/// `release_date` and `poster_path` are frequently absent or empty for
/// obscure titles, so both deserialize leniently. Unknown TMDB fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// TMDB movie ID
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Envelope of a TMDB `/search/movie` response. Only the first result is
/// ever used downstream; the envelope shape still deserializes strictly.
#[derive(Debug, Deserialize)]
pub struct TmdbSearchResponse {
    pub results: Vec<MovieRecord>,
}
