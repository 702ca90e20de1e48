//! File-based image blob cache
//!
//! Stores one binary blob per numeric cache key as `<cache_dir>/<key>.jpg`.
//! Writes go through a temporary file and an atomic rename so a reader never
//! sees a partially written entry.

mod cache;
mod error;
mod types;

pub use cache::BlobCache;
pub use error::{BlobCacheError, Result};
pub use types::CacheKey;
