use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::path::Path;

use super::CacheStore;
use crate::database::{self, bundles, DbPool};
use crate::domain::MatchBundle;
use crate::errors::CacheError;

/// Match bundles stored as JSON payloads in a SQLite table
pub struct SqliteCache {
    pool: DbPool,
}

impl SqliteCache {
    pub fn open(database_path: &Path) -> Result<Self> {
        let pool = database::create_pool(database_path)?;
        let mut conn = database::get_connection(&pool)?;
        database::setup::ensure_schema(&mut conn)?;

        let stored = bundles::count(&mut conn)?;
        info!("Opened cache database {} ({} matches stored)", database_path.display(), stored);

        Ok(Self { pool })
    }
}

#[async_trait]
impl CacheStore for SqliteCache {
    async fn get_item(&self, key: &str) -> Result<Option<MatchBundle>, CacheError> {
        let mut conn = self.pool.get()?;

        let Some(row) = bundles::find_by_key(&mut conn, key)? else {
            return Ok(None);
        };

        debug!("Loaded {} from cache (stored {})", row.cache_key, row.stored_at);
        serde_json::from_str(&row.payload)
            .map(Some)
            .map_err(|e| CacheError::serialization(key, e))
    }

    async fn set_item(&self, key: &str, bundle: &MatchBundle) -> Result<(), CacheError> {
        let payload = serde_json::to_string(bundle).map_err(|e| CacheError::serialization(key, e))?;
        let mut conn = self.pool.get()?;

        bundles::upsert_payload(&mut conn, key, &payload)?;
        info!("Saved {} to cache database", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_sqlite_cache_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");
        let bundle: MatchBundle = serde_json::from_value(json!({
            "shooters": [{"id": 3, "publicId": "P3", "name": "Lior"}],
            "scores": [{"id": 1, "stageIdx": 1, "shooterId": 3, "timestamp": 5, "dq": true}],
            "stages": [{"id": "a", "idx": 1, "inactive": true}]
        }))
        .unwrap();

        {
            let cache = SqliteCache::open(&path).unwrap();
            assert!(cache.get_item("match_x").await.unwrap().is_none());
            cache.set_item("match_x", &bundle).await.unwrap();
            cache.set_item("match_x", &bundle).await.unwrap();
        }

        let reopened = SqliteCache::open(&path).unwrap();
        assert_eq!(reopened.get_item("match_x").await.unwrap(), Some(bundle));
    }
}
