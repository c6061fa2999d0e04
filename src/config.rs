//! Configuration System
//!
//! Loads settings from a TOML file with environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogError, Creator};
use crate::transport::TransportConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Replaces the built-in catalog when non-empty
    #[serde(default)]
    pub creators: Vec<Creator>,
}

/// Chat backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_chat_path() -> String {
    "/api/chat".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_path: default_chat_path(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load the first config file found in the default locations
    ///
    /// Without any file this is defaults plus environment overrides. A file
    /// that exists but fails to load is an error, so callers can report it
    /// once logging is up.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("creator-chat").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CREATOR_CHAT_API_URL") {
            self.api.base_url = url;
        }
        if let Some(path) = lookup("CREATOR_CHAT_CHAT_PATH") {
            self.api.chat_path = path;
        }
        if let Some(timeout) = lookup("CREATOR_CHAT_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => tracing::warn!(value = %timeout, "Ignoring invalid CREATOR_CHAT_TIMEOUT_SECS"),
            }
        }

        if let Some(level) = lookup("CREATOR_CHAT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CREATOR_CHAT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Creator catalog: the configured list, or the built-in one
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        if self.creators.is_empty() {
            return Ok(Catalog::builtin());
        }
        Ok(Catalog::new(self.creators.clone())?)
    }

    /// Settings for the HTTP chat client
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.api.base_url.clone(),
            chat_path: self.api.chat_path.clone(),
            request_timeout_ms: self.api.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid creator list: {0}")]
    Catalog(#[from] CatalogError),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Creator Chat Configuration
#
# Environment variables override these settings:
# - CREATOR_CHAT_API_URL
# - CREATOR_CHAT_CHAT_PATH
# - CREATOR_CHAT_TIMEOUT_SECS
# - CREATOR_CHAT_LOG_LEVEL
# - CREATOR_CHAT_LOG_FORMAT

[api]
# Base URL of the chat backend
base_url = "http://localhost:8000"

# Path of the chat endpoint
chat_path = "/api/chat"

# Request timeout in seconds
request_timeout_secs = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"

# Uncomment to replace the built-in creators
# [[creators]]
# id = 1
# name = "Marques Brownlee"
# specialty = "\"MKBHD\""
# avatar = "photos/Marques_Brownlee.jpg"
# description = "Tech reviewer and YouTuber known for in-depth smartphone and gadget reviews."
"#
    .to_string()
}
