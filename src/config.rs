use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default catalog service address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Prefix for environment overrides, e.g. `LIBRARY_CATALOG_API__BASE_URL`.
pub const ENV_PREFIX: &str = "LIBRARY_CATALOG_";

/// Project-local config file, checked in the working directory.
const LOCAL_CONFIG_FILE: &str = "library-catalog.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub tui: TuiConfig,
}

/// Catalog service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Extra headers sent with every request, on top of the JSON defaults.
    pub headers: BTreeMap<String, String>,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: BTreeMap::new(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 50 }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

impl AppConfig {
    /// Load configuration from all sources.
    ///
    /// Precedence (highest first): `LIBRARY_CATALOG_*` environment variables,
    /// `./library-catalog.toml`, `~/.config/library-catalog/config.toml`,
    /// built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        log::info!("Catalog service at {}", config.api.base_url);
        Ok(config)
    }

    /// Build the provider chain. Public so tests can layer on top of it.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                log::debug!("Merging config from {}", global_path.display());
                figment = figment.merge(Toml::file(global_path));
            }
        }

        figment
            .merge(Toml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("library-catalog").join("config.toml"))
    }
}
