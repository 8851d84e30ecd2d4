//! Spotify Web API integration
//!
//! Client-credentials token exchange and track search.
//! API docs: https://developer.spotify.com/documentation/web-api

mod adapter;
mod client;
pub mod dto;

pub use client::SpotifyClient;

/// Token endpoint for the client-credentials grant
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Base URL of the Web API
pub const API_BASE_URL: &str = "https://api.spotify.com/v1";
