//! Movie metadata provider abstraction.
//!
//! Keeps the orchestrator decoupled from any particular metadata source so
//! it can be exercised against substitute implementations in tests.

use crate::{error::AppResult, models::MovieRecord};

pub mod tmdb;

/// Trait for movie metadata search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Look up the best-matching record for a title.
    ///
    /// Returns `None` when the search yields no match; that outcome is a
    /// success and must never be conflated with a lookup failure.
    async fn find_movie(&self, title: &str) -> AppResult<Option<MovieRecord>>;
}
