use std::path::PathBuf;

use clap::ValueEnum;

pub const DEFAULT_API_BASE_URL: &str = "https://us-central1-ipsc-firestore.cloudfunctions.net";

#[derive(Debug, Clone)]
pub struct FetcherSettings {
    pub rate_limit_ms: u64,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub api_base_url: String,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 100, // 10 req/sec
            user_agent: "ShooterStatus/0.1".to_string(),
            timeout_secs: 30,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Where finalized match bundles are kept between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackend {
    /// Single SQLite database file
    Sqlite,
    /// One JSON file per match
    Files,
    /// Always fetch live
    None,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    pub path: Option<PathBuf>,
    /// Matches that ended more than this many days ago are final
    pub eligibility_days: i64,
}

impl CacheSettings {
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        match self.backend {
            CacheBackend::Files => PathBuf::from("cache"),
            _ => PathBuf::from("shooter_status_cache.db"),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Sqlite,
            path: None,
            eligibility_days: 30,
        }
    }
}

/// Which matches of the global listing are considered
#[derive(Debug, Clone)]
pub struct MatchFilter {
    pub country_code: String,
    pub min_level: i32,
}

impl Default for MatchFilter {
    fn default() -> Self {
        Self {
            country_code: "IL".to_string(),
            min_level: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub fetcher: FetcherSettings,
    pub cache: CacheSettings,
    pub matches: MatchFilter,
}

impl AppConfig {
    /// Defaults with `IPSC_API_BASE_URL` and `CACHE_PATH` applied
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("IPSC_API_BASE_URL") {
            config.fetcher.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(path) = std::env::var("CACHE_PATH") {
            config.cache.path = Some(PathBuf::from(path));
        }
        config
    }

    pub fn with_cache(mut self, backend: CacheBackend, path: Option<PathBuf>) -> Self {
        self.cache.backend = backend;
        if path.is_some() {
            self.cache.path = path;
        }
        self
    }
}
