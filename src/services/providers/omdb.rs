/// OMDB API provider
///
/// Search goes through `GET /?s=<query>&page=<n>&apiKey=<key>`. OMDB always
/// answers with a JSON body; failures are reported in its `Error` field,
/// including the "no matches" case, which is not treated as an error.
///
/// OMDB reports a total result count rather than a page count, so whether
/// another page exists is decided from the number of results collected by the
/// whole call so far.
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{OmdbSearchResponse, SearchResult},
    services::{
        context::SearchContext,
        providers::{Page, PageRequest, PageSource, Searcher},
        title_search::{paginate, DEFAULT_MAX_PAGES},
        transport::{HttpRequest, HttpTransport},
    },
};

const PROVIDER: &str = "omdb";

/// `Error` text OMDB uses when a search matched nothing
const NOT_FOUND_ERROR: &str = "Movie not found!";

#[derive(Clone)]
pub struct OmdbProvider {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(transport: Arc<dyn HttpTransport>, api_key: String, api_url: String) -> Self {
        Self {
            transport,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_request(&self, query: &str, page: u32) -> HttpRequest {
        HttpRequest::get(format!("{}/", self.api_url))
            .query("apiKey", self.api_key.as_str())
            .query("s", query)
            .query("page", page.to_string())
    }

    fn convert_response(
        &self,
        response: OmdbSearchResponse,
        request: PageRequest,
    ) -> AppResult<Page> {
        let total_results: usize = response.total_results.trim().parse().map_err(|e| {
            AppError::ResultParsing(format!(
                "Failed to convert totalResults {:?} to int: {}",
                response.total_results, e
            ))
        })?;

        let results: Vec<SearchResult> = response
            .search
            .into_iter()
            .filter_map(|item| item.into_search_result())
            .take(request.remaining)
            .collect();

        let quota_left = results.len() < request.remaining;
        let collected = request.collected + results.len();

        Ok(Page {
            results,
            has_more: collected < total_results && quota_left,
        })
    }
}

#[async_trait::async_trait]
impl PageSource for OmdbProvider {
    async fn fetch_page(
        &self,
        ctx: &SearchContext,
        query: &str,
        request: PageRequest,
    ) -> AppResult<Page> {
        let http_request = self.build_request(query, request.page);
        tracing::debug!(query = %query, page = request.page, "OMDB request");

        let response = ctx.run(self.transport.get(http_request)).await?;

        let body: OmdbSearchResponse = match serde_json::from_str(&response.body) {
            Ok(body) => body,
            Err(_) if !response.is_success() => {
                return Err(AppError::provider(
                    PROVIDER,
                    format!("OMDB API returned status {}: {}", response.status, response.body),
                ));
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    response = %response.body,
                    "Failed to deserialize OMDB response"
                );
                return Err(AppError::ResultParsing(format!(
                    "Failed to parse OMDB response: {}",
                    e
                )));
            }
        };

        if body.error == NOT_FOUND_ERROR {
            tracing::debug!(query = %query, page = request.page, "OMDB found no titles");
            return Ok(Page::empty());
        }

        if !body.error.is_empty() {
            tracing::warn!(
                status = response.status,
                message = %body.error,
                "OMDB search failed"
            );
            return Err(AppError::provider(PROVIDER, body.error));
        }

        if !response.is_success() {
            return Err(AppError::provider(
                PROVIDER,
                format!("OMDB API returned status {}", response.status),
            ));
        }

        self.convert_response(body, request)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[async_trait::async_trait]
impl Searcher for OmdbProvider {
    async fn search(
        &self,
        ctx: &SearchContext,
        query: &str,
        max_results: usize,
    ) -> AppResult<Vec<SearchResult>> {
        paginate(self, ctx, query, max_results, DEFAULT_MAX_PAGES).await
    }
}
