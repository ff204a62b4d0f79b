use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::SearchResult,
    services::context::SearchContext,
    services::providers::{PageRequest, PageSource, Searcher},
};

/// Pages fetched per call before giving up on a provider that keeps
/// reporting more results
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Provider-agnostic search entry point
///
/// Owns the pagination loop and quota accounting and delegates each page
/// fetch to the configured [`PageSource`].
#[derive(Clone)]
pub struct SearchAggregator {
    source: Arc<dyn PageSource>,
    max_pages: u32,
}

impl SearchAggregator {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.source.name()
    }
}

#[async_trait::async_trait]
impl Searcher for SearchAggregator {
    async fn search(
        &self,
        ctx: &SearchContext,
        query: &str,
        max_results: usize,
    ) -> AppResult<Vec<SearchResult>> {
        paginate(self.source.as_ref(), ctx, query, max_results, self.max_pages).await
    }
}

/// Fetches successive pages from `source` until `max_results` results are
/// collected, the source reports no more pages, or `max_pages` pages were read.
///
/// Pages are requested strictly one after another. Any error aborts the call
/// and the results collected so far are dropped.
pub async fn paginate(
    source: &dyn PageSource,
    ctx: &SearchContext,
    query: &str,
    max_results: usize,
    max_pages: u32,
) -> AppResult<Vec<SearchResult>> {
    if max_results == 0 {
        return Err(AppError::InvalidMaxResults);
    }

    let mut results: Vec<SearchResult> = Vec::new();
    let mut page = 1;

    while results.len() < max_results {
        if page > max_pages {
            tracing::warn!(
                provider = source.name(),
                query = %query,
                max_pages = max_pages,
                results = results.len(),
                "Page limit reached before the provider ran out of results"
            );
            break;
        }

        ctx.check()?;

        let remaining = max_results - results.len();
        let fetched = source
            .fetch_page(
                ctx,
                query,
                PageRequest {
                    page,
                    remaining,
                    collected: results.len(),
                },
            )
            .await?;

        tracing::info!(
            provider = source.name(),
            query = %query,
            page = page,
            results = fetched.results.len(),
            "Found results on page"
        );

        results.extend(fetched.results.into_iter().take(remaining));

        if !fetched.has_more {
            break;
        }

        page += 1;
    }

    tracing::debug!(
        provider = source.name(),
        query = %query,
        results = results.len(),
        pages = page,
        "Title search completed"
    );

    Ok(results)
}

/// Service function for title search
///
/// Rejects blank queries before they reach a provider, then delegates to the
/// configured searcher.
pub async fn search_titles(
    searcher: Arc<dyn Searcher>,
    ctx: &SearchContext,
    query: &str,
    max_results: usize,
) -> AppResult<Vec<SearchResult>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    searcher.search(ctx, query, max_results).await
}
