mod memory;
mod sqlite;
mod structs;

use async_trait::async_trait;
use log::{info, warn};

use crate::config::{CacheBackend, CacheSettings};
use crate::domain::MatchBundle;
use crate::errors::CacheError;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;
pub use structs::FileCache;

/// Key-value persistence for match bundles
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<MatchBundle>, CacheError>;

    async fn set_item(&self, key: &str, bundle: &MatchBundle) -> Result<(), CacheError>;
}

#[async_trait]
impl<T: CacheStore + ?Sized> CacheStore for Box<T> {
    async fn get_item(&self, key: &str) -> Result<Option<MatchBundle>, CacheError> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, bundle: &MatchBundle) -> Result<(), CacheError> {
        (**self).set_item(key, bundle).await
    }
}

/// Cache key of a match bundle
pub fn cache_key(match_id: &str) -> String {
    format!("match_{}", match_id)
}

/// Store that never holds anything
pub struct NoCache;

#[async_trait]
impl CacheStore for NoCache {
    async fn get_item(&self, _key: &str) -> Result<Option<MatchBundle>, CacheError> {
        Ok(None)
    }

    async fn set_item(&self, _key: &str, _bundle: &MatchBundle) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Stand-in for a store that could not be opened; every lookup fails
pub struct UnavailableCache {
    reason: String,
}

impl UnavailableCache {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CacheStore for UnavailableCache {
    async fn get_item(&self, _key: &str) -> Result<Option<MatchBundle>, CacheError> {
        Err(CacheError::Unavailable(self.reason.clone()))
    }

    async fn set_item(&self, _key: &str, _bundle: &MatchBundle) -> Result<(), CacheError> {
        Err(CacheError::Unavailable(self.reason.clone()))
    }
}

/// Opens the configured store; a store that fails to open degrades to
/// [`UnavailableCache`] so matches are still fetched directly.
pub async fn open_store(settings: &CacheSettings) -> Box<dyn CacheStore> {
    let path = settings.resolved_path();

    let opened: anyhow::Result<Box<dyn CacheStore>> = match settings.backend {
        CacheBackend::Sqlite => SqliteCache::open(&path).map(|c| Box::new(c) as Box<dyn CacheStore>),
        CacheBackend::Files => FileCache::new(&path)
            .await
            .map(|c| Box::new(c) as Box<dyn CacheStore>),
        CacheBackend::None => Ok(Box::new(NoCache)),
    };

    match opened {
        Ok(store) => {
            info!("Using {:?} cache at {}", settings.backend, path.display());
            store
        }
        Err(e) => {
            warn!("Cache at {} unavailable, fetching without cache: {:#}", path.display(), e);
            Box::new(UnavailableCache::new(format!("{:#}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key("abc123"), "match_abc123");
    }

    #[tokio::test]
    async fn test_unavailable_cache_fails_lookups() {
        let store: Box<dyn CacheStore> = Box::new(UnavailableCache::new("disk gone"));

        let err = store.get_item("match_1").await.unwrap_err();

        assert!(matches!(err, CacheError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_open_store_degrades_when_path_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let settings = CacheSettings {
            backend: CacheBackend::Files,
            path: Some(blocker.join("cache")),
            eligibility_days: 30,
        };
        let store = open_store(&settings).await;

        assert!(store.get_item("match_1").await.is_err());
    }
}
