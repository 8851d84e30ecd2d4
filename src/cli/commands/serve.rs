//! HTTP proxy command.

use anyhow::Context;
use std::net::SocketAddr;
use tokio::runtime::Runtime;
use tracing::info;

use crate::api::{self, AppState};
use crate::catalog::CatalogClient;
use crate::config::Config;

/// Run the proxy until Ctrl+C
///
/// Missing credentials don't stop the server: the catalog routes answer 500
/// until the process is restarted with credentials.
pub fn cmd_serve(rt: &Runtime, config: &Config, bind: Option<SocketAddr>) -> anyhow::Result<()> {
    let addr = match bind {
        Some(addr) => addr,
        None => config
            .server
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address {:?}", config.server.bind_address))?,
    };

    let catalog = match config.catalog_config() {
        Some(catalog_config) => {
            info!(market = %catalog_config.market, "Catalog client configured");
            Some(CatalogClient::new(catalog_config).context("Failed to build HTTP client")?)
        }
        None => None,
    };

    rt.block_on(api::run(addr, AppState::new(catalog)))?;
    Ok(())
}
