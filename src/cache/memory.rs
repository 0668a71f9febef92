use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::CacheStore;
use crate::domain::MatchBundle;
use crate::errors::CacheError;

/// Process-local store, lost on exit
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, MatchBundle>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains_key(key)
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get_item(&self, key: &str) -> Result<Option<MatchBundle>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, bundle: &MatchBundle) -> Result<(), CacheError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), bundle.clone());
        Ok(())
    }
}
