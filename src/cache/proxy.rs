//! Short-lived in-memory cache for passthrough upstream responses.
//!
//! Non-finished-match endpoints are proxied verbatim; this map just keeps
//! each response around for a small freshness window so page loads don't
//! hammer the rate-limited upstream. No merge logic, no persistence.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

pub const PASSTHROUGH_TTL_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct ProxyEntry {
    fetched_at: DateTime<Utc>,
    body: Value,
}

#[derive(Debug, Clone)]
pub struct ProxyCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, ProxyEntry>>>,
}

impl ProxyCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the cached body for an endpoint if it is still inside the
    /// freshness window.
    pub async fn get(&self, endpoint: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(endpoint)?;
        if Utc::now() - entry.fetched_at > self.ttl {
            return None;
        }
        Some(entry.body.clone())
    }

    pub async fn put(&self, endpoint: &str, body: Value) {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        // Expired entries are dropped here so the map stays bounded by the
        // set of endpoints requested within one window.
        entries.retain(|_, e| now - e.fetched_at <= self.ttl);
        entries.insert(
            endpoint.to_string(),
            ProxyEntry {
                fetched_at: now,
                body,
            },
        );
    }
}
