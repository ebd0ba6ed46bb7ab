//! Freshness policy for cached match records.

use chrono::{DateTime, Duration, Utc};

/// Returns true iff the record was last reconciled with upstream longer
/// than `ttl` ago. A record aged exactly `ttl` is still fresh.
pub fn is_stale(last_checked: DateTime<Utc>, ttl: Duration) -> bool {
    Utc::now() - last_checked > ttl
}
