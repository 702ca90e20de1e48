//! http.cat cache proxy
//!
//! Serves status-code images from a local cache directory, falling back to
//! http.cat on a miss. Clients may also store (PUT) and evict (DELETE) images.

mod config;
mod error;
mod server;

use crate::config::Config;
use crate::error::{CacheProxyError, Result};
use crate::server::{start_server, ServerState, SharedState};
use file_blob_cache::BlobCache;
use http_cat_client::UpstreamFetcher;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("http_cat_cache=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting http.cat cache proxy...");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!("Host: {}", config.host);
    info!("Port: {}", config.port);
    info!("Cache dir: {:?}", config.cache_dir);
    info!("Upstream: {}", config.upstream_url);

    // Create cache and fetcher
    let cache = BlobCache::new(config.cache_dir);
    cache.init().await?;

    let fetcher = UpstreamFetcher::with_base_url(&config.upstream_url, config.upstream_timeout)?;

    let state: SharedState = Arc::new(ServerState::new(cache, fetcher));

    // Start HTTP server (blocking)
    start_server(state, &config.host, config.port)
        .await
        .map_err(|e| CacheProxyError::Config(format!("Server error: {}", e)))?;

    Ok(())
}
