//! Error types for the blob cache

use std::fmt;

#[derive(Debug)]
pub enum BlobCacheError {
    /// No entry is stored under the key
    NotFound(String),
    Io(std::io::Error),
}

impl fmt::Display for BlobCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobCacheError::NotFound(key) => write!(f, "Cache entry not found: {}", key),
            BlobCacheError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for BlobCacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlobCacheError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BlobCacheError {
    fn from(err: std::io::Error) -> Self {
        BlobCacheError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, BlobCacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = BlobCacheError::NotFound("404".to_string());
        assert_eq!(format!("{}", err), "Cache entry not found: 404");
    }

    #[test]
    fn test_io_error_has_source() {
        let err = BlobCacheError::from(std::io::Error::other("disk full"));
        assert!(format!("{}", err).contains("disk full"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
