//! Catalog service - the client the route layer talks to
//!
//! Every operation follows the same chain:
//! 1. Ensure a valid access token (cached, or exchanged on a miss)
//! 2. Issue a single search request
//! 3. Return normalized tracks
//!
//! [`CatalogClient::search`] propagates every failure. The two derived
//! queries, [`popular_tracks`](CatalogClient::popular_tracks) and
//! [`tracks_by_genre`](CatalogClient::tracks_by_genre), never fail: they log
//! the cause and return an empty list so a browse page degrades to "nothing
//! found" instead of an error.
//!
//! One client is meant to be shared by the whole process. The token cache is
//! not shared across processes.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::IndexedRandom;

use super::credentials::{CredentialManager, DEFAULT_SAFETY_MARGIN};
use super::domain::{CatalogError, Credential, SearchQuery, Track};
use super::spotify::{self, SpotifyClient};
use super::traits::CatalogApi;

/// Market applied to every search unless configured otherwise
pub const DEFAULT_MARKET: &str = "BR";

/// Page size for the popular sampler
pub const POPULAR_LIMIT: u32 = 50;

/// Page size for genre lookups
pub const GENRE_LIMIT: u32 = 30;

/// Candidate phrases for the popular sampler
pub const DEFAULT_POPULAR_QUERIES: &[&str] = &[
    "top hits 2024",
    "pop hits",
    "rock classics",
    "hip hop",
    "brazilian music",
    "electronic",
    "indie",
    "latin pop",
];

/// Configuration for the catalog client
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Provider application client ID
    pub client_id: String,
    /// Provider application client secret
    pub client_secret: String,
    /// Market (ISO 3166-1 alpha-2) applied to searches
    pub market: String,
    pub token_url: String,
    pub api_base_url: String,
    /// Upper bound on every provider request
    pub request_timeout: Duration,
    /// Subtracted from the token lifetime before it counts as expired
    pub token_safety_margin: Duration,
    /// Phrases the popular sampler picks from
    pub popular_queries: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            market: DEFAULT_MARKET.to_string(),
            token_url: spotify::TOKEN_URL.to_string(),
            api_base_url: spotify::API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            token_safety_margin: DEFAULT_SAFETY_MARGIN,
            popular_queries: DEFAULT_POPULAR_QUERIES
                .iter()
                .map(|q| q.to_string())
                .collect(),
        }
    }
}

/// Picks the query used by [`CatalogClient::popular_tracks`].
pub trait QuerySelector: Send + Sync {
    fn select<'a>(&self, candidates: &'a [String]) -> Option<&'a str>;
}

/// Uniform random choice, so repeated calls shuffle the content shown
pub struct RandomSelector;

impl QuerySelector for RandomSelector {
    fn select<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        candidates.choose(&mut rand::rng()).map(String::as_str)
    }
}

/// Always picks the candidate at a fixed index
pub struct FixedSelector(pub usize);

impl QuerySelector for FixedSelector {
    fn select<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        candidates.get(self.0).map(String::as_str)
    }
}

/// Catalog client: token lifecycle plus search and derived queries
pub struct CatalogClient {
    api: Arc<dyn CatalogApi>,
    credentials: CredentialManager,
    market: String,
    popular_queries: Vec<String>,
    selector: Box<dyn QuerySelector>,
}

impl CatalogClient {
    /// Create a client talking to the real provider
    pub fn new(config: CatalogConfig) -> Result<Self, reqwest::Error> {
        let api = SpotifyClient::new(&config)?;
        Ok(Self::with_api(Arc::new(api), config))
    }

    /// Create a client over any provider implementation
    pub fn with_api(api: Arc<dyn CatalogApi>, config: CatalogConfig) -> Self {
        Self {
            api,
            credentials: CredentialManager::new(config.token_safety_margin),
            market: config.market,
            popular_queries: config.popular_queries,
            selector: Box::new(RandomSelector),
        }
    }

    /// Replace the popular-query selector
    pub fn with_selector(mut self, selector: impl QuerySelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Market configured for this client
    pub fn market(&self) -> &str {
        &self.market
    }

    /// Return a valid access credential, refreshing it if needed
    pub async fn ensure_credential(&self) -> Result<Credential, CatalogError> {
        self.credentials.ensure(self.api.as_ref()).await
    }

    /// Search tracks by free text
    ///
    /// Blank text fails with [`CatalogError::InvalidQuery`] before any network
    /// call. The provider's result order is preserved.
    pub async fn search(
        &self,
        text: &str,
        limit: u32,
        market: &str,
    ) -> Result<Vec<Track>, CatalogError> {
        let query = SearchQuery::new(text, limit, market)?;
        let credential = self.ensure_credential().await?;
        let tracks = self.api.search_tracks(&credential.token, &query).await?;

        tracing::debug!(q = %query.text, count = tracks.len(), "Search completed");
        Ok(tracks)
    }

    /// Sample popular tracks using one of the configured query phrases
    ///
    /// Returns an empty list on any failure.
    pub async fn popular_tracks(&self) -> Vec<Track> {
        let Some(query) = self.selector.select(&self.popular_queries) else {
            tracing::warn!("No popular queries configured");
            return Vec::new();
        };

        tracing::debug!(query, "Sampling popular tracks");
        match self.search(query, POPULAR_LIMIT, &self.market).await {
            Ok(tracks) => tracks,
            Err(e) => {
                tracing::warn!("Popular tracks lookup failed for {:?}: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Tracks tagged with a genre
    ///
    /// Returns an empty list on any failure.
    pub async fn tracks_by_genre(&self, genre: &str) -> Vec<Track> {
        if genre.trim().is_empty() {
            tracing::warn!("Genre lookup called with an empty genre");
            return Vec::new();
        }

        match self
            .search(&format!("genre:{}", genre), GENRE_LIMIT, &self.market)
            .await
        {
            Ok(tracks) => tracks,
            Err(e) => {
                tracing::warn!("Genre lookup failed for {:?}: {}", genre, e);
                Vec::new()
            }
        }
    }
}
