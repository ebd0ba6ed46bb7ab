//! Orchestrates cache reads, freshness checks, upstream fetches and merges
//! for a team's finished matches.

use std::sync::Arc;

use chrono::Duration;

use crate::cache::{freshness, store, MatchCacheStore};
use crate::errors::{AppError, Result};
use crate::models::football::MatchesResponse;
use crate::services::football_api::UpstreamApi;

/// Where the served data came from; exposed to clients as the `X-Cache`
/// response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Fresh cache, no upstream call.
    Hit,
    /// Fetched from upstream, merged and persisted.
    Miss,
    /// Upstream failed, serving the old cache.
    Stale,
    /// Something broke mid-sequence, serving the old cache anyway.
    ErrorFallback,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Stale => "STALE",
            CacheStatus::ErrorFallback => "ERROR-FALLBACK",
        }
    }

    pub fn cache_control(&self) -> Option<&'static str> {
        match self {
            CacheStatus::Hit | CacheStatus::Miss => {
                Some("public, s-maxage=3600, stale-while-revalidate=7200")
            }
            CacheStatus::Stale => Some("public, s-maxage=300"),
            CacheStatus::ErrorFallback => None,
        }
    }
}

#[derive(Clone)]
pub struct MatchService {
    upstream: Arc<dyn UpstreamApi>,
    store: MatchCacheStore,
    ttl: Duration,
}

impl MatchService {
    pub fn new(upstream: Arc<dyn UpstreamApi>, store: MatchCacheStore, ttl: Duration) -> Self {
        Self {
            upstream,
            store,
            ttl,
        }
    }

    /// Returns the team's finished matches, kickoff-descending, together
    /// with where they came from.
    ///
    /// Decision procedure: serve the cache when it is fresh; otherwise
    /// fetch upstream, merge into the cache and persist; on upstream
    /// failure fall back to whatever cache exists, however stale. Only the
    /// successful-fetch path mutates persisted state.
    pub async fn finished_matches(&self, team_id: u32) -> Result<(MatchesResponse, CacheStatus)> {
        let cached = self.store.read(team_id);

        if let Some(record) = &cached {
            if !freshness::is_stale(record.last_checked, self.ttl) {
                tracing::info!(
                    "returning {} cached matches for team {}",
                    record.matches.len(),
                    team_id
                );
                return Ok((
                    MatchesResponse::from_matches(record.matches.clone()),
                    CacheStatus::Hit,
                ));
            }
        }

        tracing::info!("cache stale or missing for team {}, fetching upstream", team_id);
        let endpoint = format!("/teams/{}/matches?status=FINISHED", team_id);

        let payload = match self.upstream.fetch(&endpoint).await {
            Ok(payload) => payload,
            Err(err) => {
                return match cached {
                    Some(record) => {
                        tracing::warn!(
                            "upstream failed for team {}, serving stale cache: {}",
                            team_id,
                            err
                        );
                        Ok((
                            MatchesResponse::from_matches(record.matches),
                            CacheStatus::Stale,
                        ))
                    }
                    None => Err(err),
                };
            }
        };

        match serde_json::from_value::<MatchesResponse>(payload) {
            Ok(response) => {
                let existing = cached.map(|r| r.matches).unwrap_or_default();
                let merged = store::merge(existing, response.matches);
                self.store.write(team_id, &merged);
                Ok((MatchesResponse::from_matches(merged), CacheStatus::Miss))
            }
            Err(err) => {
                tracing::error!(
                    "unusable upstream payload for team {}: {}",
                    team_id,
                    err
                );
                // Last resort: one more cache read before giving up.
                match self.store.read(team_id) {
                    Some(record) => Ok((
                        MatchesResponse::from_matches(record.matches),
                        CacheStatus::ErrorFallback,
                    )),
                    None => Err(AppError::NoData),
                }
            }
        }
    }
}
