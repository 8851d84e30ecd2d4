//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `serve`: the HTTP proxy
//! - `query`: one-shot search, popular and genre lookups
//! - `config`: config file inspection and initialization

mod config;
mod query;
mod serve;

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use config::cmd_config;
pub use query::{cmd_genre, cmd_popular, cmd_search};
pub use serve::cmd_serve;

/// Catalog proxy CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Provider client ID (or set SPOTIFY_CLIENT_ID env var)
    #[arg(long, env = "SPOTIFY_CLIENT_ID", global = true, hide_env_values = true)]
    pub client_id: Option<String>,

    /// Provider client secret (or set SPOTIFY_CLIENT_SECRET env var)
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", global = true, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Config file to use instead of the one in the OS config directory
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP proxy (default when no command is given)
    Serve {
        /// Address to listen on (overrides server.bind_address)
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Search tracks by free text
    Search {
        /// Search text
        query: String,
        /// Number of results (1-50)
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
        /// Print raw JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Show a sample of popular tracks
    Popular {
        /// Print raw JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Show tracks for a genre
    Genre {
        /// Genre name, e.g. "jazz"
        genre: String,
        /// Print raw JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
///
/// With no subcommand the proxy server is started.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config_file {
        Some(path) => crate::config::load_from(path),
        None => crate::config::load(),
    };
    config
        .credentials
        .apply_overrides(cli.client_id.as_deref(), cli.client_secret.as_deref());

    match &cli.command {
        None => {
            let rt = Runtime::new()?;
            cmd_serve(&rt, &config, None)
        }
        Some(Commands::Serve { bind }) => {
            let rt = Runtime::new()?;
            cmd_serve(&rt, &config, *bind)
        }
        Some(Commands::Search { query, limit, json }) => {
            let rt = Runtime::new()?;
            cmd_search(&rt, &config, query, *limit, *json)
        }
        Some(Commands::Popular { json }) => {
            let rt = Runtime::new()?;
            cmd_popular(&rt, &config, *json)
        }
        Some(Commands::Genre { genre, json }) => {
            let rt = Runtime::new()?;
            cmd_genre(&rt, &config, genre, *json)
        }
        Some(Commands::Config { init }) => cmd_config(&config, cli.config_file.as_deref(), *init),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["catalog-proxy", "search", "daft punk", "--limit", "5"])
            .unwrap();
        match cli.command {
            Some(Commands::Search { query, limit, json }) => {
                assert_eq!(query, "daft punk");
                assert_eq!(limit, 5);
                assert!(!json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_serve_bind() {
        let cli =
            Cli::try_parse_from(["catalog-proxy", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        match cli.command {
            Some(Commands::Serve { bind }) => {
                assert_eq!(bind, Some("0.0.0.0:8080".parse().unwrap()));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_global_credentials_after_subcommand() {
        let cli = Cli::try_parse_from([
            "catalog-proxy",
            "genre",
            "jazz",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
        ])
        .unwrap();
        assert_eq!(cli.client_id.as_deref(), Some("id"));
        assert_eq!(cli.client_secret.as_deref(), Some("secret"));
    }
}
