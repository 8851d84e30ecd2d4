//! Music catalog module - queries a third-party catalog on behalf of browser clients.
//!
//! # Architecture
//!
//! Same split as any provider integration here:
//! - **Domain models** (`domain.rs`) - `Track`, `Credential`, `SearchQuery` and `CatalogError`
//! - **API DTOs** (`spotify/dto.rs`) - Exact provider response shapes
//! - **Adapters** (`spotify/adapter.rs`) - Convert DTOs to domain models
//! - **Client** (`spotify/client.rs`) - HTTP client for the token and search endpoints
//! - **Credentials** (`credentials.rs`) - Token cache with a single in-flight refresh
//! - **Service** (`service.rs`) - `search`, `popular_tracks` and `tracks_by_genre`
//!
//! The client secret never leaves this module; callers only see normalized tracks.
//!
//! # Usage
//!
//! ```ignore
//! use catalog::{CatalogClient, CatalogConfig};
//!
//! let config = CatalogConfig {
//!     client_id: "your-client-id".to_string(),
//!     client_secret: "your-client-secret".to_string(),
//!     ..Default::default()
//! };
//! let catalog = CatalogClient::new(config)?;
//!
//! let tracks = catalog.search("daft punk", 20, catalog.market()).await?;
//! let popular = catalog.popular_tracks().await; // never fails, may be empty
//! ```

pub mod credentials;
pub mod domain;
pub mod service;
pub mod spotify;
pub mod traits;

pub use domain::{Album, Artist, CatalogError, Credential, Image, SearchQuery, Track};
pub use service::{CatalogClient, CatalogConfig, FixedSelector, QuerySelector, RandomSelector};
