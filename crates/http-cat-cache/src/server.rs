//! HTTP server for the image cache proxy
//!
//! Every request path is a cache key (`/<digits>`). GET serves the cached
//! image or fetches it from the upstream, PUT stores the request body and
//! DELETE evicts the entry.

use crate::error::{CacheProxyError, Result};
use axum::{
    body::{to_bytes, Body},
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderName, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use file_blob_cache::{BlobCache, CacheKey};
use http_cat_client::UpstreamFetcher;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: BlobCache,
    pub fetcher: UpstreamFetcher,
}

impl ServerState {
    pub fn new(cache: BlobCache, fetcher: UpstreamFetcher) -> Self {
        Self { cache, fetcher }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .fallback(handle_image)
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, host: &str, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Server running at http://{}:{}/", host, port);

    axum::serve(listener, router).await
}

/// Validate the key, then dispatch on method
async fn handle_image(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Response {
    info!(method = %method, uri = %uri, "Request");

    let raw_key = uri.path().strip_prefix('/').unwrap_or(uri.path());
    let Some(key) = CacheKey::parse(raw_key) else {
        debug!(path = %uri.path(), "Rejected invalid cache key");
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            "Invalid request (expected HTTP status code)",
        )
            .into_response();
    };

    match method {
        Method::GET => get_image(&state, &key).await,
        Method::PUT => put_image(&state, &key, body).await,
        Method::DELETE => delete_image(&state, &key).await,
        _ => (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET, PUT, DELETE")],
            "Method not allowed",
        )
            .into_response(),
    }
}

async fn get_image(state: &ServerState, key: &CacheKey) -> Response {
    match fetch_and_cache_image(state, key).await {
        Ok((data, from_cache)) => {
            let cache_header = if from_cache { "HIT" } else { "MISS" };
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "image/jpeg"),
                    (HeaderName::from_static("x-cache"), cache_header),
                ],
                data,
            )
                .into_response()
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Image unavailable");
            (
                StatusCode::NOT_FOUND,
                "Image not found on server or http.cat",
            )
                .into_response()
        }
    }
}

/// Fetch an image, using the cache if available
async fn fetch_and_cache_image(state: &ServerState, key: &CacheKey) -> Result<(Vec<u8>, bool)> {
    if let Some(data) = state.cache.get(key).await {
        return Ok((data, true));
    }

    info!(key = %key, "Not found in cache, trying upstream");
    let data = state.fetcher.fetch(key.as_str()).await?;

    // The client still gets the image when caching fails
    if let Err(e) = state.cache.put(key, &data).await {
        warn!(key = %key, error = %e, "Failed to cache fetched image");
    }

    Ok((data, false))
}

async fn put_image(state: &ServerState, key: &CacheKey, body: Body) -> Response {
    match store_body(state, key, body).await {
        Ok(size) => {
            info!(key = %key, size, "Image saved to cache");
            (StatusCode::CREATED, "Image saved to cache").into_response()
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to store image");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error writing file").into_response()
        }
    }
}

async fn store_body(state: &ServerState, key: &CacheKey, body: Body) -> Result<usize> {
    let data = to_bytes(body, usize::MAX)
        .await
        .map_err(|e| CacheProxyError::from(std::io::Error::other(e)))?;
    state.cache.put(key, &data).await?;
    Ok(data.len())
}

async fn delete_image(state: &ServerState, key: &CacheKey) -> Response {
    match state.cache.remove(key).await {
        Ok(()) => {
            info!(key = %key, "Image deleted");
            (StatusCode::OK, "Image deleted").into_response()
        }
        Err(e) => {
            debug!(key = %key, error = %e, "Delete failed");
            (StatusCode::NOT_FOUND, "Image not found").into_response()
        }
    }
}
