//! File-backed cache of finished matches, one JSON record per team.
//!
//! The store owns the on-disk representation; callers get owned copies.
//! Reads treat missing or unparsable files as an empty cache, and writes
//! are best-effort: an I/O failure is logged and swallowed, never returned.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::football::Match;

/// Persisted unit for one team's finished matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCacheRecord {
    /// Instant of the last successful reconciliation with upstream.
    pub last_checked: DateTime<Utc>,
    pub team_id: u32,
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone)]
pub struct MatchCacheStore {
    dir: PathBuf,
}

impl MatchCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, team_id: u32) -> PathBuf {
        self.dir.join(format!("{}_finished.json", team_id))
    }

    /// Reads the cached record for a team. Missing files and corrupt
    /// contents both come back as `None`.
    pub fn read(&self, team_id: u32) -> Option<MatchCacheRecord> {
        let path = self.record_path(team_id);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(
                    "discarding unreadable match cache for team {}: {}",
                    team_id,
                    err
                );
                None
            }
        }
    }

    /// Replaces the team's record with the given matches, sorted by kickoff
    /// descending, and stamps `lastChecked` with the current time.
    pub fn write(&self, team_id: u32, matches: &[Match]) {
        let mut sorted = matches.to_vec();
        sorted.sort_by(|a, b| b.utc_date.cmp(&a.utc_date));

        let record = MatchCacheRecord {
            last_checked: Utc::now(),
            team_id,
            matches: sorted,
        };

        match self.persist(&record) {
            Ok(()) => tracing::info!(
                "cached {} matches for team {}",
                record.matches.len(),
                team_id
            ),
            Err(err) => tracing::warn!(
                "failed to write match cache for team {}: {}",
                team_id,
                err
            ),
        }
    }

    fn persist(&self, record: &MatchCacheRecord) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.record_path(record.team_id), json)
    }
}

/// Combines two match lists keyed by id; for ids present in both, the
/// incoming record wins. Result is sorted by kickoff descending.
pub fn merge(existing: Vec<Match>, incoming: Vec<Match>) -> Vec<Match> {
    let mut by_id: HashMap<u64, Match> = HashMap::with_capacity(existing.len() + incoming.len());
    for m in existing {
        by_id.insert(m.id, m);
    }
    for m in incoming {
        by_id.insert(m.id, m);
    }

    let mut merged: Vec<Match> = by_id.into_values().collect();
    merged.sort_by(|a, b| b.utc_date.cmp(&a.utc_date));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::football::{MatchStatus, Score, ScorePair, TeamRef};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn team(id: u64, name: &str) -> TeamRef {
        TeamRef {
            id,
            name: name.to_string(),
            short_name: None,
            tla: None,
            crest: None,
        }
    }

    fn finished_match(id: u64, date: &str) -> Match {
        Match {
            id,
            utc_date: date.parse().expect("valid RFC 3339 date"),
            status: MatchStatus::Finished,
            matchday: None,
            stage: None,
            group: None,
            last_updated: None,
            competition: None,
            season: None,
            home_team: team(66, "Manchester United FC"),
            away_team: team(65, "Manchester City FC"),
            score: Score {
                winner: Some("HOME_TEAM".to_string()),
                duration: Some("REGULAR".to_string()),
                full_time: ScorePair {
                    home: Some(2),
                    away: Some(1),
                },
                half_time: ScorePair {
                    home: Some(1),
                    away: Some(0),
                },
            },
            goals: None,
            bookings: None,
            substitutions: None,
            referees: None,
        }
    }

    fn ids(matches: &[Match]) -> HashSet<u64> {
        matches.iter().map(|m| m.id).collect()
    }

    fn test_store() -> (MatchCacheStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        (MatchCacheStore::new(dir.path()), dir)
    }

    #[test]
    fn read_missing_record_returns_none() {
        let (store, _dir) = test_store();
        assert!(store.read(66).is_none());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let (store, _dir) = test_store();
        let matches = vec![
            finished_match(100, "2024-03-01T15:00:00Z"),
            finished_match(101, "2024-03-08T15:00:00Z"),
        ];

        store.write(66, &matches);

        let record = store.read(66).expect("record after write");
        assert_eq!(record.team_id, 66);
        assert_eq!(ids(&record.matches), HashSet::from([100, 101]));
        assert!(Utc::now() - record.last_checked < chrono::Duration::seconds(5));
    }

    #[test]
    fn write_sorts_by_kickoff_descending() {
        let (store, _dir) = test_store();
        let matches = vec![
            finished_match(1, "2024-01-01T15:00:00Z"),
            finished_match(3, "2024-03-01T15:00:00Z"),
            finished_match(2, "2024-02-01T15:00:00Z"),
        ];

        store.write(66, &matches);

        let record = store.read(66).expect("record after write");
        let order: Vec<u64> = record.matches.iter().map(|m| m.id).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn corrupt_record_reads_as_absent() {
        let (store, dir) = test_store();
        std::fs::write(dir.path().join("66_finished.json"), "{not json").expect("write file");
        assert!(store.read(66).is_none());
    }

    #[test]
    fn record_uses_camel_case_layout_on_disk() {
        let (store, dir) = test_store();
        store.write(66, &[finished_match(100, "2024-03-01T15:00:00Z")]);

        let raw =
            std::fs::read_to_string(dir.path().join("66_finished.json")).expect("cache file");
        assert!(raw.contains("\"lastChecked\""));
        assert!(raw.contains("\"teamId\""));
        assert!(raw.contains("\"utcDate\""));
    }

    #[test]
    fn merge_keeps_union_of_ids() {
        let existing = vec![
            finished_match(1, "2024-01-01T15:00:00Z"),
            finished_match(2, "2024-01-08T15:00:00Z"),
            finished_match(3, "2024-01-15T15:00:00Z"),
        ];
        let incoming = vec![
            finished_match(2, "2024-01-08T15:00:00Z"),
            finished_match(4, "2024-01-22T15:00:00Z"),
        ];

        let merged = merge(existing, incoming);
        assert_eq!(ids(&merged), HashSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn merge_incoming_wins_per_id() {
        let mut old = finished_match(2, "2024-01-08T15:00:00Z");
        old.status = MatchStatus::Scheduled;
        let new = finished_match(2, "2024-01-08T15:00:00Z");

        let merged = merge(vec![old], vec![new]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].status, MatchStatus::Finished);
    }

    #[test]
    fn merge_is_idempotent() {
        let a = vec![
            finished_match(1, "2024-01-01T15:00:00Z"),
            finished_match(2, "2024-01-08T15:00:00Z"),
        ];
        let b = vec![
            finished_match(2, "2024-01-08T15:00:00Z"),
            finished_match(4, "2024-01-22T15:00:00Z"),
        ];

        let once = merge(a.clone(), b.clone());
        let twice = merge(once.clone(), b);

        let once_ids: Vec<u64> = once.iter().map(|m| m.id).collect();
        let twice_ids: Vec<u64> = twice.iter().map(|m| m.id).collect();
        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn merge_sorts_by_kickoff_descending() {
        let merged = merge(
            vec![finished_match(1, "2024-01-01T15:00:00Z")],
            vec![
                finished_match(2, "2024-02-01T15:00:00Z"),
                finished_match(3, "2023-12-01T15:00:00Z"),
            ],
        );
        let order: Vec<u64> = merged.iter().map(|m| m.id).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }
}
