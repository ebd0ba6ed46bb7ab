use std::sync::Arc;

use chrono::Duration;

use crate::cache::proxy::PASSTHROUGH_TTL_SECS;
use crate::cache::{MatchCacheStore, ProxyCache};
use crate::config::AppConfig;
use crate::services::football_api::{FootballApi, UpstreamApi};
use crate::services::matches::MatchService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub upstream: Arc<dyn UpstreamApi>,
    pub matches: MatchService,
    pub proxy_cache: ProxyCache,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let upstream: Arc<dyn UpstreamApi> = Arc::new(FootballApi::new(
            config.football_api_base_url.clone(),
            config.football_api_key.clone(),
        ));
        Self::with_upstream(config, upstream)
    }

    /// Builds the state around a caller-provided upstream, so tests can
    /// run the full router against a scripted API.
    pub fn with_upstream(config: AppConfig, upstream: Arc<dyn UpstreamApi>) -> Self {
        let store = MatchCacheStore::new(config.cache_dir.clone());
        let matches = MatchService::new(
            Arc::clone(&upstream),
            store,
            Duration::hours(config.finished_ttl_hours),
        );

        AppState {
            config,
            upstream,
            matches,
            proxy_cache: ProxyCache::new(Duration::seconds(PASSTHROUGH_TTL_SECS)),
        }
    }
}
