//! http.cat client
//!
//! Fetches the image for a status code from `https://http.cat/<code>` or any
//! upstream serving the same path layout.

pub mod error;
pub mod fetcher;

pub use error::{Result, UpstreamError};
pub use fetcher::{UpstreamFetcher, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
