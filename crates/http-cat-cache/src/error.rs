//! Error types for the http.cat cache proxy

use std::fmt;

#[derive(Debug)]
pub enum CacheProxyError {
    Cache(file_blob_cache::BlobCacheError),
    Upstream(http_cat_client::UpstreamError),
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for CacheProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheProxyError::Cache(err) => write!(f, "Cache error: {}", err),
            CacheProxyError::Upstream(err) => write!(f, "Upstream error: {}", err),
            CacheProxyError::Io(err) => write!(f, "IO error: {}", err),
            CacheProxyError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CacheProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheProxyError::Cache(err) => Some(err),
            CacheProxyError::Upstream(err) => Some(err),
            CacheProxyError::Io(err) => Some(err.as_ref()),
            CacheProxyError::Config(_) => None,
        }
    }
}

impl From<file_blob_cache::BlobCacheError> for CacheProxyError {
    fn from(err: file_blob_cache::BlobCacheError) -> Self {
        CacheProxyError::Cache(err)
    }
}

impl From<http_cat_client::UpstreamError> for CacheProxyError {
    fn from(err: http_cat_client::UpstreamError) -> Self {
        CacheProxyError::Upstream(err)
    }
}

impl From<std::io::Error> for CacheProxyError {
    fn from(err: std::io::Error) -> Self {
        CacheProxyError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for CacheProxyError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        CacheProxyError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheProxyError>;
