//! Command-line interface for catalog-proxy.
//!
//! Runs the HTTP proxy, or queries the catalog once from the terminal.

mod commands;

pub use commands::{Cli, Commands, run_command};
