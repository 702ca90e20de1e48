use crate::error::{CacheProxyError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Proxy configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Absolute path of the cache directory
    pub cache_dir: PathBuf,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        if host.trim().is_empty() {
            return Err(CacheProxyError::Config("HOST is empty".to_string()));
        }

        let port = lookup("PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3002);

        let cache_dir = lookup("CACHE_DIR").unwrap_or_else(|| "./cache/images".to_string());
        if cache_dir.trim().is_empty() {
            return Err(CacheProxyError::Config("CACHE_DIR is empty".to_string()));
        }
        let cache_dir = std::path::absolute(&cache_dir)?;

        let upstream_url = lookup("UPSTREAM_URL")
            .unwrap_or_else(|| http_cat_client::DEFAULT_BASE_URL.to_string());

        let upstream_timeout = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(http_cat_client::DEFAULT_TIMEOUT);

        Ok(Self {
            host,
            port,
            cache_dir,
            upstream_url,
            upstream_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3002);
        assert!(config.cache_dir.is_absolute());
        assert!(config.cache_dir.ends_with("cache/images"));
        assert_eq!(config.upstream_url, "https://http.cat");
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CACHE_DIR", "/tmp/cats"),
            ("UPSTREAM_URL", "http://localhost:9000"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/cats"));
        assert_eq!(config.upstream_url, "http://localhost:9000");
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("UPSTREAM_TIMEOUT_SECS", "-1")]).unwrap();
        assert_eq!(config.port, 3002);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(matches!(
            config_from(&[("HOST", "")]),
            Err(CacheProxyError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("CACHE_DIR", " ")]),
            Err(CacheProxyError::Config(_))
        ));
    }
}
