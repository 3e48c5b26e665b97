//! Configuration loading and resolution
//!
//! Every setting is resolved in priority order:
//! 1. Command-line argument or environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! A missing config file at the default location is not an error; the
//! service starts on compiled defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Directory name used under the platform config/data directories
const APP_DIR: &str = "dpfa";

/// Compiled defaults used when neither CLI/env nor TOML provide a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub database_path: PathBuf,
    pub bind_addr: String,
    pub port: u16,
    pub base_url: String,
    pub webhook_timeout_ms: u64,
}

impl CompiledDefaults {
    /// Defaults for the platform the binary was built for
    pub fn for_current_platform() -> Self {
        let database_path = dirs::data_local_dir()
            .map(|d| d.join(APP_DIR).join("archive.db"))
            .unwrap_or_else(|| PathBuf::from("./dpfa_data/archive.db"));

        Self {
            database_path,
            bind_addr: "127.0.0.1".to_string(),
            port: 8000,
            base_url: "https://dudeperfectfanarchive.com".to_string(),
            webhook_timeout_ms: 2000,
        }
    }
}

/// One layer of optional settings.
///
/// The TOML file deserializes into this shape, and the CLI/env layer is
/// built into the same shape so both can be merged field by field.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub database_path: Option<PathBuf>,
    pub bind_addr: Option<String>,
    pub port: Option<u16>,
    pub base_url: Option<String>,
    pub webhook_url: Option<String>,
    pub webhook_timeout_ms: Option<u64>,
}

impl ConfigLayer {
    /// Parse a layer from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load a layer from a TOML file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map(Some)
    }
}

/// Fully resolved service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_path: PathBuf,
    pub bind_addr: String,
    pub port: u16,
    /// Public site origin without trailing slash (sitemap, robots, contact page URLs)
    pub base_url: String,
    /// Contact form webhook; `None` disables notifications
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
}

impl Settings {
    /// Merge layers: `overrides` beats `file`, which beats `defaults`
    pub fn resolve(
        overrides: &ConfigLayer,
        file: Option<&ConfigLayer>,
        defaults: &CompiledDefaults,
    ) -> Self {
        let empty = ConfigLayer::default();
        let file = file.unwrap_or(&empty);

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| file.base_url.clone())
            .unwrap_or_else(|| defaults.base_url.clone());

        let webhook_url = overrides
            .webhook_url
            .clone()
            .or_else(|| file.webhook_url.clone())
            .filter(|url| !url.trim().is_empty());

        Self {
            database_path: overrides
                .database_path
                .clone()
                .or_else(|| file.database_path.clone())
                .unwrap_or_else(|| defaults.database_path.clone()),
            bind_addr: overrides
                .bind_addr
                .clone()
                .or_else(|| file.bind_addr.clone())
                .unwrap_or_else(|| defaults.bind_addr.clone()),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            base_url: base_url.trim_end_matches('/').to_string(),
            webhook_url,
            webhook_timeout: Duration::from_millis(
                overrides
                    .webhook_timeout_ms
                    .or(file.webhook_timeout_ms)
                    .unwrap_or(defaults.webhook_timeout_ms),
            ),
        }
    }

    /// Socket address string for the HTTP listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Default config file location: `<config_dir>/dpfa/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Load settings from CLI/env overrides and an optional config file.
///
/// An explicitly named config file must exist. The default location is
/// optional and skipped with a log line when absent.
pub fn load_settings(overrides: &ConfigLayer, config_path: Option<&Path>) -> Result<Settings> {
    let file = match config_path {
        Some(path) => match ConfigLayer::load(path)? {
            Some(layer) => {
                info!("Loaded config file: {}", path.display());
                Some(layer)
            }
            None => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )))
            }
        },
        None => match default_config_path() {
            Some(path) => match ConfigLayer::load(&path) {
                Ok(Some(layer)) => {
                    info!("Loaded config file: {}", path.display());
                    Some(layer)
                }
                Ok(None) => {
                    info!("No config file at {}, using defaults", path.display());
                    None
                }
                Err(e) => {
                    warn!("Ignoring unreadable config file {}: {}", path.display(), e);
                    None
                }
            },
            None => None,
        },
    };

    Ok(Settings::resolve(
        overrides,
        file.as_ref(),
        &CompiledDefaults::for_current_platform(),
    ))
}
