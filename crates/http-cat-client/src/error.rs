//! Error types for the upstream image client

use std::fmt;

#[derive(Debug)]
pub enum UpstreamError {
    Http(Box<reqwest::Error>),
    /// Upstream answered with a non-2xx status
    Status(u16),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Http(err) => write!(f, "HTTP error: {}", err),
            UpstreamError::Status(status) => write!(f, "Upstream returned status {}", status),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Http(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Http(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, UpstreamError>;
