//! HTTP request handlers
//!
//! Each handler validates its input, checks that provider credentials are
//! configured, calls one catalog operation and wraps the result in a JSON
//! envelope. Upstream error detail is logged here and never returned to the
//! browser.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::api::server::AppState;
use crate::catalog::{CatalogClient, SearchQuery, Track};

/// Cache lifetime for popular and genre responses, in seconds
pub const BROWSE_MAX_AGE: u32 = 600;

/// Cache lifetime for search responses, in seconds
pub const SEARCH_MAX_AGE: u32 = 300;

pub const CREDENTIALS_MISSING: &str = "Spotify credentials not configured";
pub const QUERY_REQUIRED: &str = "Query param is required";
pub const GENRE_REQUIRED: &str = "Genre parameter is required";
pub const SEARCH_FAILED: &str = "Failed to search tracks";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TracksResponse {
    tracks: Vec<Track>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

/// `limit` stays a string so a malformed value falls back to the default
/// instead of rejecting the request
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    limit: Option<String>,
}

/// Error envelope with the status it is sent with
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    pub fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

fn tracks_response(tracks: Vec<Track>, max_age: u32) -> Response {
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, format!("max-age={}", max_age))],
        Json(TracksResponse { tracks }),
    )
        .into_response()
}

fn require_catalog(state: &AppState) -> Result<&Arc<CatalogClient>, ApiError> {
    state.catalog.as_ref().ok_or_else(|| {
        error!("{}", CREDENTIALS_MISSING);
        ApiError::internal(CREDENTIALS_MISSING)
    })
}

/// Parse the `limit` query parameter from its leading digits.
///
/// `"5abc"` reads as 5. No leading digit means the default; values past
/// `u32::MAX` saturate and get clamped by [`SearchQuery`].
fn parse_limit(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return SearchQuery::DEFAULT_LIMIT;
    };

    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..end];

    if digits.is_empty() {
        return SearchQuery::DEFAULT_LIMIT;
    }
    digits.parse().unwrap_or(u32::MAX)
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Catalog Endpoints
// ============================================================================

/// GET /popular - Sample of popular tracks
pub async fn popular(State(state): State<AppState>) -> Result<Response, ApiError> {
    let catalog = require_catalog(&state)?;
    let tracks = catalog.popular_tracks().await;
    Ok(tracks_response(tracks, BROWSE_MAX_AGE))
}

/// GET /search?q=<text>&limit=<n> - Free-text track search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let Some(text) = params.q.filter(|q| !q.trim().is_empty()) else {
        return Err(ApiError::bad_request(QUERY_REQUIRED));
    };
    let limit = parse_limit(params.limit.as_deref());

    let catalog = require_catalog(&state)?;
    match catalog.search(&text, limit, catalog.market()).await {
        Ok(tracks) => Ok(tracks_response(tracks, SEARCH_MAX_AGE)),
        Err(e) => {
            error!("Search API error for {:?}: {}", text, e);
            Err(ApiError::internal(SEARCH_FAILED))
        }
    }
}

/// GET /genres/{genre} - Tracks for one genre
pub async fn genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> Result<Response, ApiError> {
    if genre.trim().is_empty() {
        return Err(ApiError::bad_request(GENRE_REQUIRED));
    }

    let catalog = require_catalog(&state)?;
    let tracks = catalog.tracks_by_genre(&genre).await;
    Ok(tracks_response(tracks, BROWSE_MAX_AGE))
}

/// GET /genres - No genre segment supplied
pub async fn missing_genre() -> ApiError {
    ApiError::bad_request(GENRE_REQUIRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), 20);
        assert_eq!(parse_limit(Some("5")), 5);
        assert_eq!(parse_limit(Some(" 42 ")), 42);
        assert_eq!(parse_limit(Some("abc")), 20);
        assert_eq!(parse_limit(Some("-3")), 20);
        assert_eq!(parse_limit(Some("")), 20);
        assert_eq!(parse_limit(Some("5abc")), 5);
        assert_eq!(parse_limit(Some("10.5")), 10);
        assert_eq!(parse_limit(Some("99999999999")), u32::MAX);
    }

    #[test]
    fn test_error_envelope() {
        let response = ApiError::bad_request(QUERY_REQUIRED).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
