//! Trait definitions for the catalog provider.
//!
//! [`CatalogApi`] is the seam between the caching/query logic and the HTTP
//! transport. Production code uses [`SpotifyClient`](super::spotify::SpotifyClient),
//! while tests substitute [`mocks::MockCatalog`] to count calls and inject failures.

use async_trait::async_trait;

use super::domain::{AccessGrant, CatalogError, SearchQuery, Track};

/// Provider endpoints the catalog client depends on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Exchange the client identity for a fresh access token.
    async fn request_token(&self) -> Result<AccessGrant, CatalogError>;

    /// Run a track search with a valid bearer token.
    async fn search_tracks(
        &self,
        token: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Track>, CatalogError>;
}

#[async_trait]
impl CatalogApi for super::spotify::SpotifyClient {
    async fn request_token(&self) -> Result<AccessGrant, CatalogError> {
        self.request_token().await
    }

    async fn search_tracks(
        &self,
        token: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Track>, CatalogError> {
        self.search_tracks(token, query).await
    }
}
