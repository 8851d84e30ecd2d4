//! One-shot catalog lookups from the terminal.

use tokio::runtime::Runtime;

use crate::catalog::{CatalogClient, Track};
use crate::config::Config;
use crate::error::{Error, ResultExt};

/// Search tracks by free text
pub fn cmd_search(
    rt: &Runtime,
    config: &Config,
    query: &str,
    limit: u32,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = build_catalog(config)?;
    let tracks = rt
        .block_on(catalog.search(query, limit, catalog.market()))
        .with_context(format!("Searching for {:?}", query))?;
    print_tracks(&tracks, json)
}

/// Show a sample of popular tracks
pub fn cmd_popular(rt: &Runtime, config: &Config, json: bool) -> anyhow::Result<()> {
    let catalog = build_catalog(config)?;
    let tracks = rt.block_on(catalog.popular_tracks());
    print_tracks(&tracks, json)
}

/// Show tracks for a genre
pub fn cmd_genre(rt: &Runtime, config: &Config, genre: &str, json: bool) -> anyhow::Result<()> {
    let catalog = build_catalog(config)?;
    let tracks = rt.block_on(catalog.tracks_by_genre(genre));
    print_tracks(&tracks, json)
}

fn build_catalog(config: &Config) -> Result<CatalogClient, Error> {
    let catalog_config = config.catalog_config().ok_or_else(|| {
        Error::config(
            "Spotify credentials not configured. Use --client-id/--client-secret \
             or set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET",
        )
    })?;
    Ok(CatalogClient::new(catalog_config)?)
}

fn print_tracks(tracks: &[Track], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tracks)?);
        return Ok(());
    }

    if tracks.is_empty() {
        println!("No tracks found.");
        return Ok(());
    }

    for (i, track) in tracks.iter().enumerate() {
        println!("{:>2}. {}", i + 1, format_track(track));
    }
    Ok(())
}

fn format_track(track: &Track) -> String {
    let artists = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let preview = if track.preview_url.is_some() { " [preview]" } else { "" };
    format!("{} - {} ({}){}", artists, track.name, track.album.name, preview)
}
