//! Upstream client for the football-data.org v4 API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::errors::{AppError, Result};

// Upper bound on any single upstream call, so a hung request cannot stall
// a client indefinitely.
const UPSTREAM_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Seam between the orchestrator and the real HTTP client, so tests can
/// substitute a scripted upstream.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// One authenticated GET against the upstream API. Never retries;
    /// failures surface immediately for the caller's fallback handling.
    async fn fetch(&self, endpoint: &str) -> Result<Value>;
}

#[derive(Clone)]
pub struct FootballApi {
    base_url: String,
    api_key: String,
    client: Client,
}

impl FootballApi {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl UpstreamApi for FootballApi {
    async fn fetch(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .header("X-Auth-Token", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                Some(status.as_u16()),
                format!(
                    "{} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        Ok(response.json::<Value>().await?)
    }
}
