use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::SearchResult,
    routes::AppState,
    services::{title_search, SearchContext},
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    /// Maximum number of results; falls back to the configured default
    limit: Option<i64>,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<SearchResult>>> {
    let limit = params.limit.unwrap_or(state.default_limit);
    // Zero and negative limits are rejected by the search itself
    let max_results = usize::try_from(limit).unwrap_or(0);

    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        limit = limit,
        "Processing title search"
    );

    let ctx = SearchContext::with_timeout(state.search_timeout);
    let titles =
        title_search::search_titles(state.searcher.clone(), &ctx, &params.q, max_results).await?;

    tracing::info!(
        request_id = %request_id,
        results = titles.len(),
        "Title search completed"
    );

    Ok(Json(titles))
}
