//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ApiClientConfig;
use crate::session::DEFAULT_TOKEN_KEY;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gateway connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No timeout unless set
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Client settings derived from this section
    pub fn client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Token storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_file")]
    pub token_file: String,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_token_file() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("gateway-console")
                .join("session.json")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./gateway_console_session.json".to_string())
}

fn default_storage_key() -> String {
    DEFAULT_TOKEN_KEY.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            storage_key: default_storage_key(),
        }
    }
}

impl SessionConfig {
    /// Token file path with a leading `~` expanded
    pub fn token_path(&self) -> PathBuf {
        expand_home(&self.token_file)
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
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

    /// Load from default locations or environment
    ///
    /// Runs before logging is set up, so nothing is logged here; files that
    /// exist but fail to load come back in [`ConfigLoad::errors`].
    pub fn load_default() -> ConfigLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("gateway-console").join("config.toml")),
            Some(PathBuf::from("/etc/gateway-console/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first candidate that exists and parses
    ///
    /// Candidates that exist but fail are skipped and recorded.
    pub fn load_first(paths: &[PathBuf]) -> ConfigLoad {
        let mut errors = Vec::new();

        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        return ConfigLoad {
                            config,
                            source: Some(path.clone()),
                            errors,
                        }
                    }
                    Err(e) => errors.push(e),
                }
            }
        }

        ConfigLoad {
            config: Self::from_env(),
            source: None,
            errors,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any `GATEWAY_CONSOLE_*` variable source
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = var("GATEWAY_CONSOLE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("GATEWAY_CONSOLE_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.api.request_timeout_secs = Some(secs),
                Err(_) => tracing::warn!(value = %timeout, "Ignoring invalid GATEWAY_CONSOLE_TIMEOUT_SECS"),
            }
        }

        // Session overrides
        if let Some(path) = var("GATEWAY_CONSOLE_TOKEN_FILE") {
            self.session.token_file = path;
        }
        if let Some(key) = var("GATEWAY_CONSOLE_TOKEN_KEY") {
            self.session.storage_key = key;
        }

        // Logging overrides
        if let Some(level) = var("GATEWAY_CONSOLE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("GATEWAY_CONSOLE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

/// Outcome of searching the default config locations
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    /// File the config came from; `None` means defaults + environment
    pub source: Option<PathBuf>,
    /// Files that existed but could not be loaded, in search order
    pub errors: Vec<ConfigError>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Gateway Console Configuration
#
# Environment variables override these settings:
# - GATEWAY_CONSOLE_API_URL
# - GATEWAY_CONSOLE_TIMEOUT_SECS
# - GATEWAY_CONSOLE_TOKEN_FILE
# - GATEWAY_CONSOLE_TOKEN_KEY
# - GATEWAY_CONSOLE_LOG_LEVEL
# - GATEWAY_CONSOLE_LOG_FORMAT

[api]
# Base URL of the gateway
base_url = "http://localhost:8000"

# Request timeout in seconds (unset: no timeout)
# request_timeout_secs = 30

[session]
# File holding the stored bearer token
token_file = "~/.local/share/gateway-console/session.json"

# Key the token is stored under
storage_key = "token"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
