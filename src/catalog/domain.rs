//! Internal domain models for catalog queries.
//!
//! These types are OUR types - they don't change when the provider's API changes.
//! Provider responses get converted into these types by the adapter in `spotify/`.

use std::time::{Duration, Instant};

use serde::Serialize;

/// A normalized track record returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Provider track ID
    pub id: String,
    /// Track title
    pub name: String,
    /// Credited artists, in provider order
    pub artists: Vec<Artist>,
    /// Album the track appears on
    pub album: Album,
    /// 30 second preview clip, when the provider has one
    pub preview_url: Option<String>,
    /// Link to the track on the provider's web player
    pub external_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    /// Cover images, largest first as the provider orders them
    pub images: Vec<Image>,
}

/// Album artwork reference.
///
/// The provider occasionally omits dimensions; those pass through as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// A token issued by the provider's token endpoint, before it is cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub access_token: String,
    /// Lifetime in seconds, as reported by the provider
    pub expires_in: u64,
}

/// The cached bearer token plus the instant it stops being usable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub expires_at: Instant,
}

impl Credential {
    /// Build a credential from a fresh grant obtained at `now`.
    ///
    /// The safety margin is subtracted from the provider's lifetime so a token
    /// is never presented in the last seconds before it expires. A margin that
    /// would consume the whole lifetime is replaced by half the lifetime.
    ///
    /// Fails when the expiry instant can't be represented on this platform.
    pub fn from_grant(
        grant: AccessGrant,
        now: Instant,
        safety_margin: Duration,
    ) -> Result<Self, CatalogError> {
        let lifetime = Duration::from_secs(grant.expires_in);
        let usable = if safety_margin < lifetime {
            lifetime - safety_margin
        } else {
            lifetime / 2
        };
        let expires_at = now.checked_add(usable).ok_or_else(|| {
            CatalogError::Authentication(format!(
                "token lifetime of {}s is out of range",
                grant.expires_in
            ))
        })?;

        Ok(Self {
            token: grant.access_token,
            expires_at,
        })
    }

    /// Whether the credential may still be presented at `now`
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// A single search request against the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: u32,
    pub market: String,
}

impl SearchQuery {
    /// Limit used when the caller doesn't ask for one
    pub const DEFAULT_LIMIT: u32 = 20;
    /// Largest page the provider serves
    pub const MAX_LIMIT: u32 = 50;

    /// Validate the query text and clamp the limit into `1..=MAX_LIMIT`.
    pub fn new(
        text: impl Into<String>,
        limit: u32,
        market: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CatalogError::InvalidQuery(
                "search text must not be empty".to_string(),
            ));
        }

        Ok(Self {
            text,
            limit: limit.clamp(1, Self::MAX_LIMIT),
            market: market.into(),
        })
    }
}

/// Errors surfaced by the catalog client
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// Token exchange failed: bad credentials, upstream outage, timeout or malformed response
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Caller-supplied query violates preconditions
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Search failed after a valid credential was obtained
    #[error("Search failed: {message}")]
    Search {
        /// Upstream HTTP status, absent for timeouts and malformed bodies
        status: Option<u16>,
        message: String,
    },
}

impl CatalogError {
    /// Create a search error for a non-success upstream status.
    pub fn search_status(status: u16, message: impl Into<String>) -> Self {
        Self::Search {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a search error that has no upstream status.
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search {
            status: None,
            message: message.into(),
        }
    }

    /// Upstream HTTP status, if the error carries one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Search { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(expires_in: u64) -> AccessGrant {
        AccessGrant {
            access_token: "token".to_string(),
            expires_in,
        }
    }

    #[test]
    fn test_credential_expiry_subtracts_margin() {
        let now = Instant::now();
        let credential = Credential::from_grant(grant(3600), now, Duration::from_secs(60)).unwrap();

        assert_eq!(credential.expires_at, now + Duration::from_secs(3540));
        assert!(credential.is_valid_at(now + Duration::from_secs(3539)));
        assert!(!credential.is_valid_at(now + Duration::from_secs(3540)));
    }

    #[test]
    fn test_short_lifetime_keeps_full_margin() {
        let now = Instant::now();
        let credential = Credential::from_grant(grant(100), now, Duration::from_secs(60)).unwrap();

        assert_eq!(credential.expires_at, now + Duration::from_secs(40));
        assert!(credential.is_valid_at(now + Duration::from_secs(39)));
        assert!(!credential.is_valid_at(now + Duration::from_secs(41)));
    }

    #[test]
    fn test_margin_covering_lifetime_keeps_half() {
        let now = Instant::now();
        let credential = Credential::from_grant(grant(30), now, Duration::from_secs(60)).unwrap();
        assert_eq!(credential.expires_at, now + Duration::from_secs(15));

        let credential = Credential::from_grant(grant(60), now, Duration::from_secs(60)).unwrap();
        assert_eq!(credential.expires_at, now + Duration::from_secs(30));
    }

    #[test]
    fn test_unrepresentable_lifetime_is_an_error() {
        let result = Credential::from_grant(grant(u64::MAX), Instant::now(), Duration::from_secs(60));
        assert!(matches!(result, Err(CatalogError::Authentication(_))));
    }

    #[test]
    fn test_search_query_rejects_blank_text() {
        assert!(matches!(
            SearchQuery::new("", 20, "BR"),
            Err(CatalogError::InvalidQuery(_))
        ));
        assert!(matches!(
            SearchQuery::new("   ", 20, "BR"),
            Err(CatalogError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_search_query_clamps_limit() {
        assert_eq!(SearchQuery::new("a", 0, "BR").unwrap().limit, 1);
        assert_eq!(SearchQuery::new("a", 500, "BR").unwrap().limit, 50);
        assert_eq!(SearchQuery::new("a", 20, "BR").unwrap().limit, 20);
    }

    #[test]
    fn test_track_serializes_camel_case() {
        let track = Track {
            id: "t1".to_string(),
            name: "One More Time".to_string(),
            artists: vec![],
            album: Album {
                id: "a1".to_string(),
                name: "Discovery".to_string(),
                images: vec![],
            },
            preview_url: None,
            external_url: "https://open.spotify.com/track/t1".to_string(),
        };

        let json = serde_json::to_value(&track).unwrap();
        assert!(json["previewUrl"].is_null());
        assert_eq!(json["externalUrl"], "https://open.spotify.com/track/t1");
    }

    #[test]
    fn test_upstream_status() {
        assert_eq!(
            CatalogError::search_status(503, "unavailable").upstream_status(),
            Some(503)
        );
        assert_eq!(CatalogError::search("timeout").upstream_status(), None);
        assert_eq!(
            CatalogError::Authentication("401".to_string()).upstream_status(),
            None
        );
    }
}
