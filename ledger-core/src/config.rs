//! Configuration for the bet book

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bet book configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// JSON snapshot to load on start and save to on request
    pub snapshot_path: Option<PathBuf>,

    /// Currency used when a new bet leaves it blank
    pub default_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "ledger-core".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            snapshot_path: None,
            default_currency: "USD".to_string(),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(path) = std::env::var("BETBOOK_SNAPSHOT") {
            config.snapshot_path = Some(PathBuf::from(path));
        }

        if let Ok(currency) = std::env::var("BETBOOK_DEFAULT_CURRENCY") {
            if currency.trim().is_empty() {
                return Err(crate::Error::Config(
                    "BETBOOK_DEFAULT_CURRENCY must not be empty".to_string(),
                ));
            }
            config.default_currency = currency.trim().to_string();
        }

        Ok(config)
    }
}
