use thiserror::Error;

/// Context for a failed request
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Context for a response body that did not match the expected shape
pub fn parse_context(data_type: &str, url: &str) -> String {
    format!("Failed to parse {} from: {}", data_type, url)
}

/// Failure of the cache store. Callers fall back to uncached fetching.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cache entry {key} is not a valid match bundle: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cache database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("cache connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("cache store unavailable: {0}")]
    Unavailable(String),
}

impl CacheError {
    pub fn io(key: &str, source: std::io::Error) -> Self {
        CacheError::Io {
            key: key.to_string(),
            source,
        }
    }

    pub fn serialization(key: &str, source: serde_json::Error) -> Self {
        CacheError::Serialization {
            key: key.to_string(),
            source,
        }
    }
}
