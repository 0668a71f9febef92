mod ipsc_client;
pub mod models;
pub mod parsers;

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Match, ScoreRecord, Shooter, Stage};

pub use ipsc_client::IpscClient;
pub use models::ScoreBundleResponse;

/// Read access to the remote results service
#[async_trait]
pub trait Fetcher: Send {
    /// Every known match, keyed by match id
    async fn get_matches(&mut self) -> Result<HashMap<String, Match>>;

    async fn get_stages(&mut self, stage_ids: &[String]) -> Result<Vec<Stage>>;

    async fn get_shooters(&mut self, match_id: &str) -> Result<Vec<Shooter>>;

    async fn get_scores(&mut self, match_id: &str) -> Result<ScoreBundleResponse>;

    /// Historical snapshot referenced by `ScoreBundleResponse::base`
    async fn get_base_scores(&mut self, url: &str) -> Result<Vec<ScoreRecord>>;
}
