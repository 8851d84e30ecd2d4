//! Spotify Web API HTTP client
//!
//! Handles the two endpoints the proxy needs:
//! - `POST {token_url}`: client-credentials grant, Basic authorization
//! - `GET {api_base_url}/search`: track search, Bearer authorization
//!
//! See: https://developer.spotify.com/documentation/web-api/tutorials/client-credentials-flow
//!
//! This client holds no token state. Caching lives in
//! [`CredentialManager`](crate::catalog::credentials::CredentialManager).
//!
//! Every request is bounded by the configured timeout. A timed out token
//! request surfaces as [`CatalogError::Authentication`], a timed out search as
//! [`CatalogError::Search`] without a status.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::AUTHORIZATION;

use super::{adapter, dto};
use crate::catalog::domain::{AccessGrant, CatalogError, SearchQuery, Track};
use crate::catalog::service::CatalogConfig;

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    /// Precomputed `Basic base64(id:secret)` header value
    authorization: String,
    token_url: String,
    api_base_url: String,
}

impl SpotifyClient {
    /// Create a new client from the catalog configuration
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses
    /// - Send a User-Agent header identifying the application
    /// - Abort any request that exceeds `request_timeout`
    pub fn new(config: &CatalogConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(config.request_timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http_client,
            authorization: basic_authorization(&config.client_id, &config.client_secret),
            token_url: config.token_url.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange the client identity for an access token
    pub async fn request_token(&self) -> Result<AccessGrant, CatalogError> {
        let response = self.send_token_request().await?;
        adapter::to_grant(response)
    }

    /// Run a track search with an already valid bearer token
    pub async fn search_tracks(
        &self,
        token: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Track>, CatalogError> {
        let response = self.send_search_request(token, query).await?;
        Ok(adapter::to_tracks(response))
    }

    async fn send_token_request(&self) -> Result<dto::TokenResponse, CatalogError> {
        tracing::debug!(url = %self.token_url, "Requesting client-credentials token");

        let response = self
            .http_client
            .post(&self.token_url)
            .header(AUTHORIZATION, &self.authorization)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CatalogError::Authentication(describe(&e)))?;

        let status = response.status();

        if !status.is_success() {
            let detail = match response.json::<dto::TokenErrorResponse>().await {
                Ok(body) => body.error_description.unwrap_or(body.error),
                Err(_) => status.canonical_reason().unwrap_or("Unknown").to_string(),
            };
            return Err(CatalogError::Authentication(format!(
                "HTTP {}: {}",
                status, detail
            )));
        }

        response
            .json::<dto::TokenResponse>()
            .await
            .map_err(|e| CatalogError::Authentication(format!("malformed token response: {}", e)))
    }

    async fn send_search_request(
        &self,
        token: &str,
        query: &SearchQuery,
    ) -> Result<dto::SearchResponse, CatalogError> {
        let url = format!("{}/search", self.api_base_url);
        let limit = query.limit.to_string();

        tracing::debug!(q = %query.text, limit = query.limit, market = %query.market, "Searching tracks");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query.text.as_str()),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("market", query.market.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CatalogError::search(describe(&e)))?;

        let status = response.status();

        if !status.is_success() {
            let detail = match response.json::<dto::ErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => status.canonical_reason().unwrap_or("Unknown").to_string(),
            };
            return Err(CatalogError::search_status(
                status.as_u16(),
                format!("HTTP {}: {}", status, detail),
            ));
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| CatalogError::search(format!("malformed search response: {}", e)))
    }
}

/// Build the `Authorization` value for the client-credentials grant
fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {}", error)
    } else {
        error.to_string()
    }
}
