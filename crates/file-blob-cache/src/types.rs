//! Cache types

use std::fmt;

/// A validated cache key: one or more ASCII decimal digits, nothing else.
///
/// Keys mirror HTTP status codes but are not checked against the real
/// status-code range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Parse a raw key, returning `None` unless it matches `^[0-9]+$`
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the entry inside the cache directory
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
