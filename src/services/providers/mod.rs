/// Title search provider abstraction
///
/// This module provides a pluggable architecture for different title metadata
/// sources (TMDB, OMDB, ...). Each provider knows how to fetch and normalize a
/// single page of search results; paging until a result quota is met is shared
/// and lives in [`crate::services::title_search`].
use crate::{
    error::AppResult,
    models::SearchResult,
    services::context::SearchContext,
};

pub mod omdb;
pub mod tmdb;

pub use omdb::OmdbProvider;
pub use tmdb::TmdbProvider;

/// Anything that can answer a title search with up to `max_results` results
///
/// Implemented by every provider and by [`crate::services::SearchAggregator`];
/// callers cannot tell which backend answered except through the data.
#[async_trait::async_trait]
pub trait Searcher: Send + Sync {
    /// Search for titles by name
    ///
    /// Returns at most `max_results` results in provider order. Fails with
    /// `InvalidMaxResults` when `max_results` is zero. A query with no matches
    /// is a successful, empty result.
    async fn search(
        &self,
        ctx: &SearchContext,
        query: &str,
        max_results: usize,
    ) -> AppResult<Vec<SearchResult>>;
}

/// One page fetch, as requested by the pagination loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based provider page number
    pub page: u32,
    /// Hard ceiling on results this page may contribute
    pub remaining: usize,
    /// Results accumulated by the whole call before this page
    pub collected: usize,
}

/// Normalized results of one provider round trip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub results: Vec<SearchResult>,
    /// Whether the pagination loop should ask for the next page
    pub has_more: bool,
}

impl Page {
    /// Nothing matched and nothing more to fetch
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A provider's single-page fetch capability
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch and normalize one page of results
    ///
    /// Implementations must not return more than `request.remaining` results
    /// and must report `has_more = false` once the quota is exhausted.
    async fn fetch_page(
        &self,
        ctx: &SearchContext,
        query: &str,
        request: PageRequest,
    ) -> AppResult<Page>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
