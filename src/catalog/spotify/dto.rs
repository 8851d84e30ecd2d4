//! Spotify Web API Data Transfer Objects
//!
//! These types match what the token and search endpoints return.
//! Fields we don't use are left out and ignored by serde; fields we do use are
//! required, so a shape change fails at deserialization instead of downstream.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api/reference/search
//!
//! Example search response:
//! ```json
//! {
//!   "tracks": {
//!     "items": [{
//!       "id": "0DiWol3AO6WpXZgp0goxAV",
//!       "name": "One More Time",
//!       "artists": [{"id": "4tZwfgrHOc3mvqYlEYSvVi", "name": "Daft Punk"}],
//!       "album": {"id": "2noRn2Aes5aoNVsU6iWThc", "name": "Discovery", "images": []},
//!       "preview_url": null,
//!       "external_urls": {"spotify": "https://open.spotify.com/track/0DiWol3AO6WpXZgp0goxAV"}
//!     }],
//!     "total": 1, "limit": 20, "offset": 0
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Client-credentials token response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer" for this grant
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

/// Error body returned by the token endpoint (OAuth2 error format)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

/// Top-level search response (type=track)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

/// One page of track results
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackPage {
    pub items: Vec<TrackItem>,
    pub total: u32,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
    /// Null for tracks without a preview clip
    pub preview_url: Option<String>,
    pub external_urls: ExternalUrls,
}

/// Simplified artist object embedded in a track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

/// Simplified album object embedded in a track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageRef {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

/// Error body returned by the Web API on non-success statuses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorDetail {
    pub status: u16,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
