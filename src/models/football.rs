//! Wire types for the football-data.org v4 API.
//!
//! Field names follow the upstream camelCase JSON so cached records stay
//! byte-compatible with what the API returns.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Timed,
    InPlay,
    Paused,
    Finished,
    Suspended,
    Postponed,
    Cancelled,
}

/// Slim team reference as embedded in match payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tla: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crest: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub competition_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emblem: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_matchday: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScorePair {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub full_time: ScorePair,
    #[serde(default)]
    pub half_time: ScorePair,
}

/// A person attached to a match: referee, scorer, assist, substituted player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default)]
    pub minute: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury_time: Option<i32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<String>,
    pub team: TeamRef,
    pub scorer: Person,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assist: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<ScorePair>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Card {
    YellowCard,
    RedCard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default)]
    pub minute: Option<i32>,
    pub team: TeamRef,
    pub player: Person,
    pub card: Card,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    #[serde(default)]
    pub minute: Option<i32>,
    pub team: TeamRef,
    pub player_out: Person,
    pub player_in: Person,
}

/// One fixture. Records with the same `id` describe the same fixture at
/// different points in its lifecycle; later data supersedes earlier data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u64,
    pub utc_date: DateTime<Utc>,
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matchday: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<Competition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    #[serde(default)]
    pub score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<Booking>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitutions: Option<Vec<Substitution>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referees: Option<Vec<Person>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
    #[serde(default)]
    pub played: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    #[serde(default)]
    pub filters: Value,
    #[serde(default)]
    pub result_set: ResultSet,
    pub matches: Vec<Match>,
}

impl MatchesResponse {
    /// Builds a response body around an already kickoff-descending match
    /// list, recomputing the result set the way the proxy route does.
    pub fn from_matches(matches: Vec<Match>) -> Self {
        let stamp = |m: &Match| m.utc_date.to_rfc3339_opts(SecondsFormat::Secs, true);
        let result_set = ResultSet {
            count: matches.len(),
            first: matches.first().map(&stamp).unwrap_or_default(),
            last: matches.last().map(&stamp).unwrap_or_default(),
            played: matches.len(),
        };
        MatchesResponse {
            filters: json!({}),
            result_set,
            matches,
        }
    }
}
