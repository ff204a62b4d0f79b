use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use title_search::{
    config::Config,
    routes::{create_router, AppState},
    services::{aggregator_from_config, ReqwestTransport},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("title_search=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let transport = ReqwestTransport::new(Duration::from_secs(config.search_timeout_secs))?;
    let aggregator = aggregator_from_config(&config, Arc::new(transport));

    tracing::info!(
        provider = aggregator.provider_name(),
        max_pages = config.search_max_pages,
        "Search provider configured"
    );

    let state = Arc::new(AppState::new(Arc::new(aggregator), &config));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
