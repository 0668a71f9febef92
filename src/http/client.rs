use crate::errors::{fetch_context, parse_context};
use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client with built-in rate limiting
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn get(&mut self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.wait().await;
        self.send_get_request(url).await
    }

    /// GET `url` and decode the JSON body as `T`
    pub async fn get_json<T: DeserializeOwned>(&mut self, url: &str, data_type: &str) -> Result<T> {
        let response = self.get(url).await?;

        if !response.status().is_success() {
            anyhow::bail!("API returned status {} for {}", response.status(), url);
        }

        let body = response.text().await.with_context(|| fetch_context(url))?;
        debug!("Received {} bytes of {} (request #{})", body.len(), data_type, self.rate_limiter.request_count());

        serde_json::from_str(&body).with_context(|| parse_context(data_type, url))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| fetch_context(url))
    }
}
