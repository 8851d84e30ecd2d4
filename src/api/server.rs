//! HTTP server setup and routing
//!
//! Sets up the Axum HTTP server with the catalog endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::CatalogClient;
use crate::error::{Error, Result};

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// One client per process, so the token cache is shared by every route.
    /// `None` when provider credentials are not configured.
    pub catalog: Option<Arc<CatalogClient>>,
}

impl AppState {
    pub fn new(catalog: Option<CatalogClient>) -> Self {
        Self {
            catalog: catalog.map(Arc::new),
        }
    }
}

/// Build the router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(super::handlers::health))
        .route("/popular", get(super::handlers::popular))
        .route("/search", get(super::handlers::search))
        .route("/genres", get(super::handlers::missing_genre))
        .route("/genres/", get(super::handlers::missing_genre))
        .route("/genres/:genre", get(super::handlers::genre))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser front-ends are served from a different origin
        .layer(CorsLayer::permissive())
}

/// Run HTTP API server until Ctrl+C
pub async fn run(addr: SocketAddr, state: AppState) -> Result<()> {
    if state.catalog.is_none() {
        tracing::warn!("Provider credentials missing; catalog routes will answer 500");
    }

    let app = router(state);

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server(e.to_string()))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
