//! Config file inspection.

use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::error::Result;

/// Print the effective configuration, optionally writing a default file first
pub fn cmd_config(config: &Config, path: Option<&Path>, init: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => config::config_path(),
    };

    if init {
        match init_config(path.as_deref())? {
            Some(written) => println!("Wrote default config to {:?}", written),
            None => println!("Config already exists, leaving it untouched"),
        }
    }

    match &path {
        Some(p) => println!("Config file: {:?}", p),
        None => println!("Config file: <no config directory>"),
    }
    println!();
    println!("  Credentials: {}", describe_credentials(config));
    println!("  Market:      {}", config.catalog.market);
    println!("  Token URL:   {}", config.catalog.token_url);
    println!("  API URL:     {}", config.catalog.api_base_url);
    println!("  Timeout:     {}s", config.catalog.request_timeout_secs);
    println!("  Token slack: {}s", config.catalog.token_safety_margin_secs);
    println!("  Popular:     {}", config.catalog.popular_queries.join(", "));
    println!("  Bind:        {}", config.server.bind_address);
    Ok(())
}

/// Write a default config file unless one exists.
///
/// Returns the path written, or `None` when a file was already there.
fn init_config(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(p) if p.exists() => Ok(None),
        Some(p) => {
            config::save_to(&Config::default(), p)?;
            Ok(Some(p.to_path_buf()))
        }
        None => Ok(Some(config::save(&Config::default())?)),
    }
}

/// Never prints the secret itself
fn describe_credentials(config: &Config) -> String {
    match config.credentials.pair() {
        Some((id, _)) => format!("client id {}", id),
        None => "not configured".to_string(),
    }
}
