//! Test utilities and fixtures for catalog-proxy tests.
//!
//! This module provides sample provider payloads, track factories and an
//! in-process stub provider to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{catalog_config, spawn_stub_provider};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let base = spawn_stub_provider(router).await;
//!     let client = SpotifyClient::new(&catalog_config(&base)).unwrap();
//!     // ... test logic
//! }
//! ```

use std::time::Duration;

use axum::Router;

use crate::catalog::{Album, Artist, CatalogConfig, Image, Track};

/// Search response with two items, the first without a preview clip.
pub const SEARCH_RESPONSE_JSON: &str = r#"{
    "tracks": {
        "href": "https://api.spotify.com/v1/search?query=daft+punk&type=track&market=BR&offset=0&limit=20",
        "items": [
            {
                "id": "0DiWol3AO6WpXZgp0goxAV",
                "name": "One More Time",
                "popularity": 78,
                "artists": [
                    {"id": "4tZwfgrHOc3mvqYlEYSvVi", "name": "Daft Punk", "type": "artist"}
                ],
                "album": {
                    "id": "2noRn2Aes5aoNVsU6iWThc",
                    "name": "Discovery",
                    "images": [
                        {"url": "https://i.scdn.co/image/discovery-640", "height": 640, "width": 640},
                        {"url": "https://i.scdn.co/image/discovery-300", "height": 300, "width": 300}
                    ]
                },
                "preview_url": null,
                "external_urls": {"spotify": "https://open.spotify.com/track/0DiWol3AO6WpXZgp0goxAV"}
            },
            {
                "id": "69kOkLUCkxIZYexIgSG8rq",
                "name": "Get Lucky",
                "popularity": 81,
                "artists": [
                    {"id": "4tZwfgrHOc3mvqYlEYSvVi", "name": "Daft Punk", "type": "artist"},
                    {"id": "2RdwBSPQiwcmiDo9kixcl8", "name": "Pharrell Williams", "type": "artist"}
                ],
                "album": {
                    "id": "4m2880jivSbbyEGAKfITCa",
                    "name": "Random Access Memories",
                    "images": [
                        {"url": "https://i.scdn.co/image/ram-640", "height": 640, "width": 640}
                    ]
                },
                "preview_url": "https://p.scdn.co/mp3-preview/abc",
                "external_urls": {"spotify": "https://open.spotify.com/track/69kOkLUCkxIZYexIgSG8rq"}
            }
        ],
        "limit": 20,
        "next": null,
        "offset": 0,
        "previous": null,
        "total": 2
    }
}"#;

/// Creates a track with sensible defaults.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let custom = Track {
///     preview_url: Some("https://p.scdn.co/x".to_string()),
///     ..sample_track("t1", "Song")
/// };
/// ```
pub fn sample_track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec![Artist {
            id: "artist-1".to_string(),
            name: "Test Artist".to_string(),
        }],
        album: Album {
            id: "album-1".to_string(),
            name: "Test Album".to_string(),
            images: vec![Image {
                url: "https://i.scdn.co/image/test".to_string(),
                height: Some(300),
                width: Some(300),
            }],
        },
        preview_url: None,
        external_url: format!("https://open.spotify.com/track/{}", id),
    }
}

/// Catalog config pointing both endpoints at a stub provider.
///
/// The token endpoint lives at `{base_url}/api/token`, the Web API at `{base_url}/v1`.
pub fn catalog_config(base_url: &str) -> CatalogConfig {
    CatalogConfig {
        client_id: "test-id".to_string(),
        client_secret: "test-secret".to_string(),
        token_url: format!("{}/api/token", base_url),
        api_base_url: format!("{}/v1", base_url),
        request_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

/// Serves `router` on an ephemeral localhost port and returns its base URL.
///
/// The server task lives until the test runtime shuts down.
pub async fn spawn_stub_provider(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub provider");
    let addr = listener
        .local_addr()
        .expect("Failed to read stub provider address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub provider failed");
    });

    format!("http://{}", addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_track_defaults() {
        let track = sample_track("t1", "Song");
        assert_eq!(track.id, "t1");
        assert_eq!(track.name, "Song");
        assert_eq!(track.external_url, "https://open.spotify.com/track/t1");
        assert!(track.preview_url.is_none());
    }

    #[test]
    fn test_catalog_config_points_at_stub() {
        let config = catalog_config("http://127.0.0.1:1234");
        assert_eq!(config.token_url, "http://127.0.0.1:1234/api/token");
        assert_eq!(config.api_base_url, "http://127.0.0.1:1234/v1");
        assert_eq!(config.market, "BR");
    }

    #[tokio::test]
    async fn test_stub_provider_serves_requests() {
        let router = Router::new().route("/ping", axum::routing::get(|| async { "pong" }));
        let base = spawn_stub_provider(router).await;

        let body = reqwest::get(format!("{}/ping", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "pong");
    }
}
