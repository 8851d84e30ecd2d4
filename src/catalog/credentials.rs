//! Access-token cache for the client-credentials grant.
//!
//! The cached [`Credential`] sits behind an async mutex that stays locked for
//! the whole token exchange. At most one token request is in flight per
//! manager; callers that arrive during a refresh wait on the lock and then
//! take the fresh credential from the cache.
//!
//! A failed exchange leaves the cache empty, so the next call retries instead
//! of reusing a bad state.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::domain::{CatalogError, Credential};
use super::traits::CatalogApi;

/// Default slack subtracted from the provider's token lifetime
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_secs(60);

/// Owns the single live credential of a catalog client
pub struct CredentialManager {
    cached: Mutex<Option<Credential>>,
    safety_margin: Duration,
}

impl CredentialManager {
    pub fn new(safety_margin: Duration) -> Self {
        Self {
            cached: Mutex::new(None),
            safety_margin,
        }
    }

    /// Return a credential valid right now, exchanging a new token on a cache miss.
    pub async fn ensure(&self, api: &dyn CatalogApi) -> Result<Credential, CatalogError> {
        let mut cached = self.cached.lock().await;
        self.ensure_locked(&mut cached, api, Instant::now()).await
    }

    /// Same as [`ensure`](Self::ensure), evaluated at a caller-supplied instant.
    pub async fn ensure_at(
        &self,
        api: &dyn CatalogApi,
        now: Instant,
    ) -> Result<Credential, CatalogError> {
        let mut cached = self.cached.lock().await;
        self.ensure_locked(&mut cached, api, now).await
    }

    async fn ensure_locked(
        &self,
        cached: &mut Option<Credential>,
        api: &dyn CatalogApi,
        now: Instant,
    ) -> Result<Credential, CatalogError> {
        if let Some(credential) = cached.as_ref().filter(|c| c.is_valid_at(now)) {
            tracing::trace!("Reusing cached access token");
            return Ok(credential.clone());
        }

        // Stale or absent: drop it before the exchange so a failure leaves nothing behind
        *cached = None;

        let grant = api.request_token().await.inspect_err(|e| {
            tracing::error!("Token exchange failed: {}", e);
        })?;

        let expires_in = grant.expires_in;
        let credential = Credential::from_grant(grant, now, self.safety_margin)
            .inspect_err(|e| tracing::error!("Rejected access token: {}", e))?;
        tracing::info!(expires_in, "Obtained new access token");

        *cached = Some(credential.clone());
        Ok(credential)
    }

    /// Whether a credential is cached and still valid at `now`
    pub async fn has_valid_credential(&self, now: Instant) -> bool {
        self.cached
            .lock()
            .await
            .as_ref()
            .is_some_and(|c| c.is_valid_at(now))
    }
}

impl Default for CredentialManager {
    fn default() -> Self {
        Self::new(DEFAULT_SAFETY_MARGIN)
    }
}
