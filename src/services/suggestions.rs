use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
    services::{generation::TitleGenerator, providers::MovieProvider},
};

/// Produces an ordered list of enriched movie suggestions for a free-text
/// query.
///
/// One generation call yields ranked candidate titles; each candidate is
/// then looked up concurrently. Results keep candidate order, with `None`
/// marking titles the metadata service could not match. Any single lookup
/// failure fails the whole request.
pub async fn suggest(
    generator: Arc<dyn TitleGenerator>,
    movies: Arc<dyn MovieProvider>,
    input: &str,
) -> AppResult<Vec<Option<MovieRecord>>> {
    let query = input.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a valid input".to_string(),
        ));
    }

    let titles = generator.generate_titles(query).await?;

    if titles.is_empty() {
        tracing::info!("Generation produced no candidates");
        return Ok(Vec::new());
    }

    // Fan out one lookup task per candidate, then fan in preserving the
    // candidate order.
    let mut tasks = Vec::with_capacity(titles.len());
    for title in titles {
        let provider = Arc::clone(&movies);
        tasks.push(tokio::spawn(
            async move { provider.find_movie(&title).await },
        ));
    }

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        let record = task
            .await
            .map_err(|e| AppError::Internal(format!("Lookup task failed: {}", e)))??;
        results.push(record);
    }

    tracing::info!(
        candidates = results.len(),
        matched = results.iter().filter(|r| r.is_some()).count(),
        "Suggestion lookup completed"
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{generation::MockTitleGenerator, providers::MockMovieProvider};

    fn record(id: u64, title: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            overview: Some(format!("Overview of {}", title)),
            release_date: Some("2010-07-15".to_string()),
            poster_path: None,
        }
    }

    #[tokio::test]
    async fn test_blank_input_rejected_without_outbound_calls() {
        let mut generator = MockTitleGenerator::new();
        generator.expect_generate_titles().times(0);
        let mut movies = MockMovieProvider::new();
        movies.expect_find_movie().times(0);

        let result = suggest(Arc::new(generator), Arc::new(movies), " \t \n").await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_input_is_trimmed_before_generation() {
        let mut generator = MockTitleGenerator::new();
        generator
            .expect_generate_titles()
            .withf(|input| input == "brando")
            .returning(|_| Ok(Vec::new()));
        let movies = MockMovieProvider::new();

        let results = suggest(Arc::new(generator), Arc::new(movies), "  brando  ")
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_results_preserve_candidate_order() {
        let mut generator = MockTitleGenerator::new();
        generator
            .expect_generate_titles()
            .returning(|_| Ok(vec!["A".to_string(), "B".to_string()]));

        let mut movies = MockMovieProvider::new();
        movies.expect_find_movie().returning(|title| match title {
            "A" => Ok(Some(record(1, "A"))),
            _ => Ok(None),
        });

        let results = suggest(Arc::new(generator), Arc::new(movies), "two films")
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().map(|r| r.title.as_str()), Some("A"));
        assert_eq!(results[1], None);
    }

    #[tokio::test]
    async fn test_empty_candidate_list_is_success() {
        let mut generator = MockTitleGenerator::new();
        generator
            .expect_generate_titles()
            .returning(|_| Ok(Vec::new()));
        let mut movies = MockMovieProvider::new();
        movies.expect_find_movie().times(0);

        let results = suggest(Arc::new(generator), Arc::new(movies), "nothing matches")
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_single_lookup_failure_fails_whole_request() {
        let mut generator = MockTitleGenerator::new();
        generator
            .expect_generate_titles()
            .returning(|_| Ok(vec!["A".to_string(), "B".to_string()]));

        let mut movies = MockMovieProvider::new();
        movies.expect_find_movie().returning(|title| match title {
            "A" => Ok(Some(record(1, "A"))),
            _ => Err(AppError::UpstreamLookup(
                "TMDB API returned status 500: oops".to_string(),
            )),
        });

        let result = suggest(Arc::new(generator), Arc::new(movies), "two films").await;

        assert!(matches!(result, Err(AppError::UpstreamLookup(_))));
    }

    #[tokio::test]
    async fn test_generation_error_propagates() {
        let mut generator = MockTitleGenerator::new();
        generator.expect_generate_titles().returning(|_| {
            Err(AppError::UpstreamGeneration {
                status: 429,
                body: r#"{"error":{"message":"Rate limit reached"}}"#.to_string(),
            })
        });
        let mut movies = MockMovieProvider::new();
        movies.expect_find_movie().times(0);

        let result = suggest(Arc::new(generator), Arc::new(movies), "anything").await;

        assert!(matches!(
            result,
            Err(AppError::UpstreamGeneration { status: 429, .. })
        ));
    }
}
