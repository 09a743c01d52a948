//! Title generation via a text-completion provider.
//!
//! The model is asked for a JSON array of movie titles and its reply is
//! trusted only as far as [`parse_title_array`] can parse it. The rest of
//! the pipeline never sees raw completion text.

use crate::error::AppResult;

pub mod openai;

/// Upper bound on generated titles, enforced by prompt instruction only
const MAX_TITLES: usize = 9;

/// Trait for title generation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TitleGenerator: Send + Sync {
    /// Generate candidate movie titles for a free-text query, ordered from
    /// most to least relevant.
    async fn generate_titles(&self, input: &str) -> AppResult<Vec<String>>;
}

/// Builds the completion prompt for a user query.
///
/// The worked example anchors the output format; without it the model
/// tends to prepend prose around the array.
pub(crate) fn build_prompt(input: &str) -> String {
    format!(
        r#"Create a valid JSON array of movie titles that best match this search term, ordered from most to least relevant.
Generate up to {MAX_TITLES} titles.
The response must be a valid JSON array of strings. Do not escape the double quotes in the output.

Example:
prompt: "movies with brando"
response: ["The Godfather", "On the Waterfront", "A Streetcar Named Desire", "The Godfather Part II", "Apocalypse Now"]

prompt: "{input}"
response:
"#
    )
}

/// Strictly parses completion text as an ordered list of titles.
///
/// This is the only place model output is treated as structured data. An
/// empty array is a valid parse (zero candidates); anything that is not a
/// JSON array of strings is a parse error, which callers surface as a
/// distinct failure from upstream unavailability.
pub fn parse_title_array(text: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(text.trim())
}
