use std::sync::Arc;

use anyhow::Context;
use reelmix_catalog::anilist::AniListClient;
use reelmix_catalog::discover::DiscoveryService;
use reelmix_catalog::mal::MalClient;
use reelmix_catalog::tmdb::TmdbClient;
use reelmix_server::config::ServerConfig;
use reelmix_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!(
        tmdb = %config.tmdb.base_url,
        mal = %config.mal.base_url,
        anilist = %config.anilist.base_url,
        cache_ttl_secs = config.tmdb.cache_ttl.as_secs(),
        "upstream catalogs configured"
    );

    let discovery = DiscoveryService::new(
        Arc::new(TmdbClient::new(config.tmdb.clone())),
        Arc::new(MalClient::new(config.mal.clone())),
    );
    let id_mapper = Arc::new(AniListClient::new(config.anilist.clone()));
    let app = reelmix_server::routes::build_router(AppState::new(discovery, id_mapper));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
