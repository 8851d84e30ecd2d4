//! Catalog Proxy - A server-side proxy for a third-party music catalog.
//!
//! Keeps the provider's client credentials on the server, caches the access
//! token and exposes search, popular and genre lookups over HTTP. The same
//! lookups are available as one-shot CLI commands.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment and config file still apply
    dotenvy::dotenv().ok();

    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("catalog_proxy=info".parse()?))
        .init();

    cli::run_command(&args)
}
