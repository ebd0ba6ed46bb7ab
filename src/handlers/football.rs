//! The proxy endpoint the fan site talks to.
//!
//! One route, `GET /api/football?endpoint=<upstream path>`. Finished-match
//! requests go through the cache orchestrator and carry an `X-Cache`
//! provenance header; everything else is passed through to upstream behind
//! a 60-second freshness window.

use axum::{
    extract::{Query, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::{AppError, Result};
use crate::services::matches::CacheStatus;
use crate::state::AppState;

const X_CACHE: HeaderName = HeaderName::from_static("x-cache");
const PASSTHROUGH_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=120";

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub endpoint: Option<String>,
}

pub async fn proxy(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response> {
    let endpoint = query
        .endpoint
        .ok_or_else(|| AppError::bad_request("Endpoint parameter is required"))?;

    if !state.config.has_api_key() {
        return Err(AppError::configuration("FOOTBALL_API_KEY is not set"));
    }

    if let Some(team_id) = finished_matches_team(&endpoint) {
        let (body, status) = state.matches.finished_matches(team_id).await?;
        return Ok(tagged_response(body, status));
    }

    passthrough(&state, &endpoint).await
}

/// Non-finished-match endpoints are forwarded verbatim, with responses kept
/// for one short freshness window.
async fn passthrough(state: &AppState, endpoint: &str) -> Result<Response> {
    let body = match state.proxy_cache.get(endpoint).await {
        Some(body) => body,
        None => {
            tracing::info!("proxying upstream request: {}", endpoint);
            let body = state.upstream.fetch(endpoint).await?;
            state.proxy_cache.put(endpoint, body.clone()).await;
            body
        }
    };

    let mut response = Json(body).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(PASSTHROUGH_CACHE_CONTROL),
    );
    Ok(response)
}

fn tagged_response(body: impl serde::Serialize, status: CacheStatus) -> Response {
    let mut response = Json(body).into_response();
    response
        .headers_mut()
        .insert(X_CACHE, HeaderValue::from_static(status.as_str()));
    if let Some(cache_control) = status.cache_control() {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static(cache_control));
    }
    response
}

/// Extracts the team id from endpoints shaped like
/// `/teams/{id}/matches?status=FINISHED`, the only pattern the match cache
/// handles.
fn finished_matches_team(endpoint: &str) -> Option<u32> {
    let rest = endpoint.strip_prefix("/teams/")?;
    let (id, rest) = rest.split_once('/')?;
    let team_id = id.parse().ok()?;
    rest.starts_with("matches?status=FINISHED").then_some(team_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_finished_matches_endpoint() {
        assert_eq!(
            finished_matches_team("/teams/66/matches?status=FINISHED"),
            Some(66)
        );
        assert_eq!(
            finished_matches_team("/teams/66/matches?status=FINISHED&dateFrom=2024-01-01"),
            Some(66)
        );
    }

    #[test]
    fn ignores_other_endpoints() {
        assert_eq!(finished_matches_team("/teams/66"), None);
        assert_eq!(finished_matches_team("/teams/66/matches"), None);
        assert_eq!(
            finished_matches_team("/teams/66/matches?status=SCHEDULED"),
            None
        );
        assert_eq!(finished_matches_team("/matches/100"), None);
        assert_eq!(
            finished_matches_team("/competitions/PL/standings"),
            None
        );
        assert_eq!(finished_matches_team("/teams/abc/matches?status=FINISHED"), None);
    }
}
