pub mod settings;

pub use settings::{AppConfig, CacheBackend, CacheSettings, FetcherSettings, MatchFilter};
