//! Configuration for settlement engine

use crate::labels::Locale;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settlement engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Language of result labels
    pub locale: Locale,

    /// Treat a bet whose channel cannot be found as an error
    /// instead of settling it with the Provider role
    pub strict_channels: bool,

    /// Bet book snapshot to report on
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "settlement-engine".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            locale: Locale::De,
            strict_channels: false,
            snapshot_path: None,
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

        if let Ok(locale) = std::env::var("BETBOOK_LOCALE") {
            config.locale = locale.parse().map_err(crate::Error::Config)?;
        }

        if let Ok(strict) = std::env::var("BETBOOK_STRICT_CHANNELS") {
            config.strict_channels = parse_flag(&strict).ok_or_else(|| {
                crate::Error::Config(format!("BETBOOK_STRICT_CHANNELS: not a flag: {strict:?}"))
            })?;
        }

        if let Ok(path) = std::env::var("BETBOOK_SNAPSHOT") {
            config.snapshot_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
