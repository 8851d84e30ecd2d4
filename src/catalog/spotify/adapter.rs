//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use crate::catalog::domain::{AccessGrant, Album, Artist, CatalogError, Image, Track};

/// Longest token lifetime accepted from the provider, in seconds (one day)
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 86_400;

/// Convert a token response into a grant, rejecting tokens we can't use
pub fn to_grant(response: dto::TokenResponse) -> Result<AccessGrant, CatalogError> {
    if response.access_token.is_empty() {
        return Err(CatalogError::Authentication(
            "token response contained an empty access_token".to_string(),
        ));
    }

    if !response.token_type.eq_ignore_ascii_case("bearer") {
        return Err(CatalogError::Authentication(format!(
            "unexpected token_type {:?}",
            response.token_type
        )));
    }

    if response.expires_in == 0 {
        return Err(CatalogError::Authentication(
            "token response has zero lifetime".to_string(),
        ));
    }

    if response.expires_in > MAX_TOKEN_LIFETIME_SECS {
        return Err(CatalogError::Authentication(format!(
            "token lifetime of {}s exceeds {}s",
            response.expires_in, MAX_TOKEN_LIFETIME_SECS
        )));
    }

    Ok(AccessGrant {
        access_token: response.access_token,
        expires_in: response.expires_in,
    })
}

/// Convert a search response into tracks, preserving the provider's order
pub fn to_tracks(response: dto::SearchResponse) -> Vec<Track> {
    response.tracks.items.into_iter().map(to_track).collect()
}

fn to_track(item: dto::TrackItem) -> Track {
    Track {
        id: item.id,
        name: item.name,
        artists: item
            .artists
            .into_iter()
            .map(|a| Artist {
                id: a.id,
                name: a.name,
            })
            .collect(),
        album: Album {
            id: item.album.id,
            name: item.album.name,
            images: item
                .album
                .images
                .into_iter()
                .map(|img| Image {
                    url: img.url,
                    height: img.height,
                    width: img.width,
                })
                .collect(),
        },
        preview_url: item.preview_url,
        external_url: item.external_urls.spotify,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(access_token: &str, token_type: &str, expires_in: u64) -> dto::TokenResponse {
        dto::TokenResponse {
            access_token: access_token.to_string(),
            token_type: token_type.to_string(),
            expires_in,
        }
    }

    #[test]
    fn test_to_grant_accepts_bearer_token() {
        let grant = to_grant(token("abc", "Bearer", 3600)).unwrap();
        assert_eq!(grant.access_token, "abc");
        assert_eq!(grant.expires_in, 3600);

        // Token type casing isn't significant
        assert!(to_grant(token("abc", "bearer", 3600)).is_ok());
    }

    #[test]
    fn test_to_grant_rejects_unusable_tokens() {
        for response in [
            token("", "Bearer", 3600),
            token("abc", "MAC", 3600),
            token("abc", "Bearer", 0),
            token("abc", "Bearer", MAX_TOKEN_LIFETIME_SECS + 1),
            token("abc", "Bearer", u64::MAX),
        ] {
            assert!(matches!(
                to_grant(response),
                Err(CatalogError::Authentication(_))
            ));
        }
    }

    #[test]
    fn test_to_grant_accepts_longest_lifetime() {
        let grant = to_grant(token("abc", "Bearer", MAX_TOKEN_LIFETIME_SECS)).unwrap();
        assert_eq!(grant.expires_in, 86_400);
    }

    #[test]
    fn test_to_tracks_maps_fields_in_order() {
        let response: dto::SearchResponse =
            serde_json::from_str(crate::test_utils::SEARCH_RESPONSE_JSON).unwrap();

        let tracks = to_tracks(response);
        assert_eq!(tracks.len(), 2);

        let first = &tracks[0];
        assert_eq!(first.id, "0DiWol3AO6WpXZgp0goxAV");
        assert_eq!(first.name, "One More Time");
        assert_eq!(
            first.artists,
            vec![Artist {
                id: "4tZwfgrHOc3mvqYlEYSvVi".to_string(),
                name: "Daft Punk".to_string(),
            }]
        );
        assert_eq!(first.album.name, "Discovery");
        assert_eq!(first.album.images[0].height, Some(640));
        assert_eq!(first.album.images[0].width, Some(640));
        assert_eq!(first.preview_url, None);
        assert_eq!(
            first.external_url,
            "https://open.spotify.com/track/0DiWol3AO6WpXZgp0goxAV"
        );

        let second = &tracks[1];
        assert_eq!(second.name, "Get Lucky");
        assert_eq!(second.artists.len(), 2);
        assert_eq!(second.artists[1].name, "Pharrell Williams");
        assert_eq!(
            second.preview_url.as_deref(),
            Some("https://p.scdn.co/mp3-preview/abc")
        );
    }

    #[test]
    fn test_to_tracks_empty_page() {
        let response = dto::SearchResponse {
            tracks: dto::TrackPage {
                items: vec![],
                total: 0,
                limit: 20,
                offset: 0,
            },
        };
        assert!(to_tracks(response).is_empty());
    }
}
