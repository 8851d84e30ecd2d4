//! HTTP API for browser clients.
//!
//! Three catalog routes map 1:1 onto [`CatalogClient`](crate::catalog::CatalogClient)
//! operations, plus a health check:
//! - `GET /popular` - sampled popular tracks (`Cache-Control: max-age=600`)
//! - `GET /search?q=<text>&limit=<n>` - free-text search (`max-age=300`)
//! - `GET /genres/{genre}` - tracks for a genre (`max-age=600`)
//! - `GET /health`
//!
//! Successful responses are `{"tracks": [...]}`; failures are `{"error": "..."}`
//! with status 400 for bad input and 500 for configuration or upstream failures.

pub mod handlers;
pub mod server;

pub use server::{AppState, router, run};
