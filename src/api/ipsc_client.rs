use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serde_json::Value;
use urlencoding::encode;

use super::parsers::parse_match_listing;
use super::{Fetcher, ScoreBundleResponse};
use crate::config::FetcherSettings;
use crate::domain::{Match, ScoreRecord, Shooter, Stage};
use crate::http::RateLimitedClient;

/// Client for the IPSC results cloud functions
pub struct IpscClient {
    client: RateLimitedClient,
    base_url: String,
}

impl IpscClient {
    pub fn new(settings: &FetcherSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            &settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;
        Ok(Self {
            client,
            base_url: settings.api_base_url.clone(),
        })
    }

    // --- Helper Methods ---

    fn build_matches_url(&self) -> String {
        format!("{}/get-matches", self.base_url)
    }

    fn build_stages_url(&self, stage_ids: &[String]) -> String {
        let ids: Vec<String> = stage_ids.iter().map(|id| encode(id).into_owned()).collect();
        format!("{}/get-stages?stageId={}", self.base_url, ids.join(","))
    }

    fn build_shooters_url(&self, match_id: &str) -> String {
        format!("{}/get-shooters?matchId={}", self.base_url, encode(match_id))
    }

    fn build_scores_url(&self, match_id: &str) -> String {
        format!("{}/get-scores?matchId={}", self.base_url, encode(match_id))
    }
}

#[async_trait]
impl Fetcher for IpscClient {
    async fn get_matches(&mut self) -> Result<HashMap<String, Match>> {
        let url = self.build_matches_url();
        info!("Fetching match listing from {}", url);

        let raw: HashMap<String, Value> = self.client.get_json(&url, "match listing").await?;
        let matches = parse_match_listing(raw);

        info!("Fetched {} matches", matches.len());
        Ok(matches)
    }

    async fn get_stages(&mut self, stage_ids: &[String]) -> Result<Vec<Stage>> {
        let url = self.build_stages_url(stage_ids);
        self.client.get_json(&url, "stages").await
    }

    async fn get_shooters(&mut self, match_id: &str) -> Result<Vec<Shooter>> {
        let url = self.build_shooters_url(match_id);
        self.client.get_json(&url, "shooters").await
    }

    async fn get_scores(&mut self, match_id: &str) -> Result<ScoreBundleResponse> {
        let url = self.build_scores_url(match_id);
        self.client.get_json(&url, "scores").await
    }

    async fn get_base_scores(&mut self, url: &str) -> Result<Vec<ScoreRecord>> {
        self.client.get_json(url, "base score snapshot").await
    }
}
