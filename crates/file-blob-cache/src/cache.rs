//! File-based blob storage keyed by cache code

use crate::error::{BlobCacheError, Result};
use crate::types::CacheKey;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

const TEMP_PREFIX: &str = "tmp_";

/// A blob cache storing one file per key in a single directory
#[derive(Debug, Clone)]
pub struct BlobCache {
    /// Directory where cached blobs are stored
    cache_dir: PathBuf,
}

impl BlobCache {
    /// Create a new blob cache over `cache_dir`
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Path of the entry stored under `key`
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Initialize the cache by ensuring the cache directory exists and
    /// clearing temp files left behind by interrupted writes
    pub async fn init(&self) -> Result<()> {
        if fs::try_exists(&self.cache_dir).await? {
            info!(cache_dir = ?self.cache_dir, "Cache directory exists");
        } else {
            fs::create_dir_all(&self.cache_dir).await?;
            info!(cache_dir = ?self.cache_dir, "Created cache directory");
        }

        let removed = self.remove_temp_files().await?;
        if removed > 0 {
            info!(removed, "Removed stale temp files");
        }
        Ok(())
    }

    /// Read the blob stored under `key`. Any read failure counts as a miss.
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<u8>> {
        let path = self.entry_path(key);
        match fs::read(&path).await {
            Ok(data) => {
                debug!(key = %key, size = data.len(), "Cache hit");
                Some(data)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key = %key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read cached file");
                None
            }
        }
    }

    /// Store a blob under `key`, replacing any existing entry.
    ///
    /// The data is written to a temp file in the cache directory and renamed
    /// into place, so readers see either the previous entry or the new one.
    pub async fn put(&self, key: &CacheKey, data: &[u8]) -> Result<()> {
        let temp_path = self
            .cache_dir
            .join(format!("{}{}", TEMP_PREFIX, uuid::Uuid::new_v4()));

        if let Err(e) = write_file(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, self.entry_path(key)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(key = %key, size = data.len(), "Cached blob");
        Ok(())
    }

    /// Remove the entry stored under `key`
    pub async fn remove(&self, key: &CacheKey) -> Result<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => {
                debug!(key = %key, "Removed cache entry");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(BlobCacheError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_temp_files(&self) -> Result<usize> {
        let mut removed = 0;
        let mut dir = fs::read_dir(&self.cache_dir).await?;
        while let Some(entry) = dir.next_entry().await? {
            let is_temp = entry
                .file_name()
                .to_str()
                .map(|name| name.starts_with(TEMP_PREFIX))
                .unwrap_or(false);
            if is_temp && entry.file_type().await?.is_file() {
                match fs::remove_file(entry.path()).await {
                    Ok(()) => removed += 1,
                    Err(e) => warn!(path = ?entry.path(), error = %e, "Failed to remove temp file"),
                }
            }
        }
        Ok(removed)
    }
}

async fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}
