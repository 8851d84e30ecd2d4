//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\catalog-proxy\config.toml
//! - macOS: ~/Library/Application Support/catalog-proxy/config.toml
//! - Linux: ~/.config/catalog-proxy/config.toml
//!
//! Provider credentials can also come from `SPOTIFY_CLIENT_ID` /
//! `SPOTIFY_CLIENT_SECRET` (read by the CLI, including from a `.env` file).
//! Those take precedence over the file. Empty values count as absent.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::CatalogConfig;
use crate::catalog::credentials::DEFAULT_SAFETY_MARGIN;
use crate::catalog::service::{DEFAULT_MARKET, DEFAULT_POPULAR_QUERIES};
use crate::catalog::spotify;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Catalog client settings
    pub catalog: CatalogSettings,

    /// HTTP server settings
    pub server: ServerConfig,
}

/// Provider application credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Credentials {
    /// Both values, if both are present and non-empty
    pub fn pair(&self) -> Option<(&str, &str)> {
        let id = self.client_id.as_deref().filter(|s| !s.is_empty())?;
        let secret = self.client_secret.as_deref().filter(|s| !s.is_empty())?;
        Some((id, secret))
    }

    /// Replace file values with CLI/env values where those are non-empty
    pub fn apply_overrides(&mut self, client_id: Option<&str>, client_secret: Option<&str>) {
        if let Some(id) = client_id.filter(|s| !s.is_empty()) {
            self.client_id = Some(id.to_string());
        }
        if let Some(secret) = client_secret.filter(|s| !s.is_empty()) {
            self.client_secret = Some(secret.to_string());
        }
    }
}

/// Catalog client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Market (ISO 3166-1 alpha-2) applied to every search
    pub market: String,

    pub token_url: String,

    pub api_base_url: String,

    /// Timeout for each provider request, in seconds
    pub request_timeout_secs: u64,

    /// Seconds subtracted from the token lifetime before it counts as expired
    pub token_safety_margin_secs: u64,

    /// Phrases the popular sampler picks from
    pub popular_queries: Vec<String>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            market: DEFAULT_MARKET.to_string(),
            token_url: spotify::TOKEN_URL.to_string(),
            api_base_url: spotify::API_BASE_URL.to_string(),
            request_timeout_secs: 10,
            token_safety_margin_secs: DEFAULT_SAFETY_MARGIN.as_secs(),
            popular_queries: DEFAULT_POPULAR_QUERIES
                .iter()
                .map(|q| q.to_string())
                .collect(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the proxy listens on
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:4321".to_string(),
        }
    }
}

impl Config {
    /// Build the catalog client config, or `None` when credentials are missing
    pub fn catalog_config(&self) -> Option<CatalogConfig> {
        let (client_id, client_secret) = self.credentials.pair()?;
        Some(CatalogConfig {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            market: self.catalog.market.clone(),
            token_url: self.catalog.token_url.clone(),
            api_base_url: self.catalog.api_base_url.clone(),
            request_timeout: Duration::from_secs(self.catalog.request_timeout_secs),
            token_safety_margin: Duration::from_secs(self.catalog.token_safety_margin_secs),
            popular_queries: self.catalog.popular_queries.clone(),
        })
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("catalog-proxy"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the OS config directory
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the OS config directory
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
