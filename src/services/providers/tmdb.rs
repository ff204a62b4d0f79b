/// TMDB API provider
///
/// Uses the v3 multi search endpoint, which mixes movies, TV shows and people
/// in one relevance-ordered list. People are dropped; movies and TV shows are
/// normalized into [`SearchResult`]s.
///
/// Authentication is a bearer token (TMDB "API read access token").
/// Pagination is driven by the `total_pages` field of each response.
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{SearchResult, TmdbSearchResponse},
    services::{
        context::SearchContext,
        providers::{Page, PageRequest, PageSource, Searcher},
        title_search::{paginate, DEFAULT_MAX_PAGES},
        transport::{HttpRequest, HttpTransport},
    },
};

const PROVIDER: &str = "tmdb";
const SEARCH_PATH: &str = "/3/search/multi";

#[derive(Clone)]
pub struct TmdbProvider {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_key: String,
        api_url: String,
        image_url: String,
    ) -> Self {
        Self {
            transport,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_request(&self, query: &str, page: u32) -> HttpRequest {
        HttpRequest::get(format!("{}{}", self.api_url, SEARCH_PATH))
            .query("query", query)
            .query("page", page.to_string())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("accept", "application/json")
    }

    fn poster_url(&self, poster_path: Option<&str>) -> String {
        match poster_path {
            Some(path) if !path.is_empty() => format!("{}{}", self.image_url, path),
            _ => String::new(),
        }
    }

    /// Turns one decoded response into a page of at most `request.remaining`
    /// results
    fn convert_response(&self, response: TmdbSearchResponse, request: PageRequest) -> Page {
        let mut remaining = request.remaining;
        let mut results = Vec::new();

        for item in response.results {
            if remaining == 0 {
                break;
            }

            let Some(result_type) = item.result_type() else {
                tracing::trace!(
                    media_type = %item.media_type,
                    id = item.id,
                    "Skipping unsupported TMDB media type"
                );
                continue;
            };

            results.push(
                SearchResult::new(item.display_title(), result_type)
                    .with_year(item.year())
                    .with_imdb_id(item.imdb_id.as_str())
                    .with_provider_id(item.id.to_string())
                    .with_poster_url(self.poster_url(item.poster_path.as_deref())),
            );
            remaining -= 1;
        }

        Page {
            results,
            has_more: request.page < response.total_pages && remaining > 0,
        }
    }
}

#[async_trait::async_trait]
impl PageSource for TmdbProvider {
    async fn fetch_page(
        &self,
        ctx: &SearchContext,
        query: &str,
        request: PageRequest,
    ) -> AppResult<Page> {
        let http_request = self.build_request(query, request.page);
        tracing::debug!(query = %query, page = request.page, "TMDB request");

        let response = ctx.run(self.transport.get(http_request)).await?;

        let body: TmdbSearchResponse = match serde_json::from_str(&response.body) {
            Ok(body) => body,
            // Gateways in front of TMDB answer errors with HTML
            Err(_) if !response.is_success() => {
                return Err(AppError::provider(
                    PROVIDER,
                    format!("TMDB API returned status {}: {}", response.status, response.body),
                ));
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    response = %response.body,
                    "Failed to deserialize TMDB response"
                );
                return Err(AppError::ResultParsing(format!(
                    "Failed to parse TMDB response: {}",
                    e
                )));
            }
        };

        let reported_failure = body.success == Some(false) && !body.status_message.is_empty();
        if !response.is_success() || reported_failure {
            tracing::warn!(
                status = response.status,
                message = %body.status_message,
                "TMDB search failed"
            );
            let message = if body.status_message.is_empty() {
                format!("TMDB API returned status {}", response.status)
            } else {
                body.status_message
            };
            return Err(AppError::provider(PROVIDER, message));
        }

        Ok(self.convert_response(body, request))
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[async_trait::async_trait]
impl Searcher for TmdbProvider {
    async fn search(
        &self,
        ctx: &SearchContext,
        query: &str,
        max_results: usize,
    ) -> AppResult<Vec<SearchResult>> {
        paginate(self, ctx, query, max_results, DEFAULT_MAX_PAGES).await
    }
}
