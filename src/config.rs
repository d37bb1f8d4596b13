//! Configuration loading and management for briefer.
//!
//! Loads settings from `briefer.toml` with an environment variable override for the backend URL.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE: &str = "briefer.toml";
const BACKEND_URL_ENV: &str = "BRIEFER_BACKEND_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Summarisation backend endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. "http://localhost:8000"
    pub base_url: String,
    /// Path of the article extraction endpoint
    pub extract_path: String,
    /// Path of the summarisation endpoint
    pub summarize_path: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn extract_url(&self) -> String {
        join_url(&self.base_url, &self.extract_path)
    }

    pub fn summarize_url(&self) -> String {
        join_url(&self.base_url, &self.summarize_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            extract_path: "/extract_article".to_string(),
            summarize_path: "/summarize".to_string(),
            timeout_secs: 120,
        }
    }
}

/// How requests are routed to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    /// Direct call for non-default languages, two-step otherwise
    #[default]
    Auto,
    /// Always a single call to the summarisation endpoint
    Direct,
    /// Always extract (when needed) and then summarise
    TwoStep,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub strategy: RoutingStrategy,
    /// Language the legacy two-step flow produces without translation
    pub default_language: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            strategy: RoutingStrategy::Auto,
            default_language: "en".to_string(),
        }
    }
}

/// Storage paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base path for the preference database
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data"),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub routing: RoutingConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the default location (briefer.toml in cwd or home).
    ///
    /// Falls back to defaults when no config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_found(Self::find_config_file())
    }

    fn load_found(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default().with_env_overrides()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend.base_url = url.trim().to_string();
            }
        }
        self
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::home_dir()
            .map(|home| home.join(".config").join("briefer").join(CONFIG_FILE))
            .filter(|path| path.exists())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
