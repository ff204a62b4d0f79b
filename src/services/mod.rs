use std::sync::Arc;

use crate::config::{Config, ProviderKind};

pub mod context;
pub mod providers;
pub mod title_search;
pub mod transport;

pub use context::SearchContext;
pub use providers::{OmdbProvider, Searcher, TmdbProvider};
pub use title_search::SearchAggregator;
pub use transport::{HttpTransport, ReqwestTransport};

/// Builds the aggregator for the provider selected in `config`
pub fn aggregator_from_config(
    config: &Config,
    transport: Arc<dyn HttpTransport>,
) -> SearchAggregator {
    let source: Arc<dyn providers::PageSource> = match config.search_provider {
        ProviderKind::Tmdb => Arc::new(TmdbProvider::new(
            transport,
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
        )),
        ProviderKind::Omdb => Arc::new(OmdbProvider::new(
            transport,
            config.omdb_api_key.clone(),
            config.omdb_api_url.clone(),
        )),
    };

    SearchAggregator::new(source).with_max_pages(config.search_max_pages)
}
