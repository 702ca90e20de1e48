//! Upstream image fetching

use crate::error::{Result, UpstreamError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://http.cat";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for fetching status-code images from the upstream
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    client: Client,
    base_url: String,
}

impl UpstreamFetcher {
    /// Create a fetcher for `https://http.cat`
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a fetcher for an upstream laid out like http.cat
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the image stored upstream under `code`
    pub async fn fetch(&self, code: &str) -> Result<Vec<u8>> {
        let url = format!("{}/{}", self.base_url, code);
        debug!(url = %url, "Fetching image from upstream");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), url = %url, "Upstream refused image");
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let data = response.bytes().await?.to_vec();
        debug!(size = data.len(), url = %url, "Fetched image from upstream");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Router};

    async fn spawn_upstream() -> String {
        let router = Router::new().route(
            "/{code}",
            get(|Path(code): Path<String>| async move {
                if code == "200" {
                    Ok(vec![0xFF, 0xD8, 0xFF, 0xE0])
                } else {
                    Err(StatusCode::NOT_FOUND)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let fetcher =
            UpstreamFetcher::with_base_url("http://localhost:9000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(fetcher.base_url(), "http://localhost:9000");

        let fetcher = UpstreamFetcher::new().unwrap();
        assert_eq!(fetcher.base_url(), "https://http.cat");
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let base_url = spawn_upstream().await;
        let fetcher = UpstreamFetcher::with_base_url(&base_url, DEFAULT_TIMEOUT).unwrap();

        let data = fetcher.fetch("200").await.unwrap();
        assert_eq!(data, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let base_url = spawn_upstream().await;
        let fetcher = UpstreamFetcher::with_base_url(&base_url, DEFAULT_TIMEOUT).unwrap();

        let result = fetcher.fetch("999").await;
        assert!(matches!(result, Err(UpstreamError::Status(404))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_upstream() {
        // Grab a free port, then close it so connections are refused
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher =
            UpstreamFetcher::with_base_url(&format!("http://{}", addr), DEFAULT_TIMEOUT).unwrap();
        let result = fetcher.fetch("200").await;
        assert!(matches!(result, Err(UpstreamError::Http(_))));
    }
}
