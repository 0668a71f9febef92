use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::CacheStore;
use crate::domain::MatchBundle;
use crate::errors::CacheError;

/// File-based cache, one JSON document per key
pub struct FileCache {
    cache_dir: PathBuf,
}

impl FileCache {
    /// Create a new cache instance
    pub async fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();

        fs::create_dir_all(&cache_dir)
            .await
            .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;

        Ok(Self { cache_dir })
    }

    fn build_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    async fn write_json(&self, key: &str, path: &Path, bundle: &MatchBundle) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(bundle)
            .map_err(|e| CacheError::serialization(key, e))?;

        // Readers never see a half-written entry
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .await
            .map_err(|e| CacheError::io(key, e))?;
        fs::rename(&temp_path, path)
            .await
            .map_err(|e| CacheError::io(key, e))
    }

    async fn read_json_opt(&self, key: &str, path: &Path) -> Result<Option<MatchBundle>, CacheError> {
        let json = match fs::read_to_string(path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io(key, e)),
        };

        let bundle = serde_json::from_str(&json).map_err(|e| CacheError::serialization(key, e))?;
        Ok(Some(bundle))
    }
}

#[async_trait]
impl CacheStore for FileCache {
    async fn get_item(&self, key: &str) -> Result<Option<MatchBundle>, CacheError> {
        let file_path = self.build_path(key);
        let bundle = self.read_json_opt(key, &file_path).await?;
        if bundle.is_some() {
            debug!("Loaded data from cache: {}", file_path.display());
        }
        Ok(bundle)
    }

    async fn set_item(&self, key: &str, bundle: &MatchBundle) -> Result<(), CacheError> {
        let file_path = self.build_path(key);
        self.write_json(key, &file_path, bundle).await?;
        info!("Saved data to cache: {}", file_path.display());
        Ok(())
    }
}
