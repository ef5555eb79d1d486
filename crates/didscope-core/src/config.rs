//! Configuration management for DIDScope.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Provider credentials are never read from
//! the config file; they only come from the environment.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder value shipped in sample env files for the IPQS key.
pub const IPQS_KEY_PLACEHOLDER: &str = "your_ipqs_api_key_here";

/// Placeholder value shipped in sample env files for the NumVerify key.
pub const NUMVERIFY_KEY_PLACEHOLDER: &str = "your_numverify_api_key_here";

/// Main application configuration.
///
/// This is loaded from `~/.config/didscope/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Reputation provider settings
    pub providers: ProvidersConfig,
    /// Batch processing settings
    pub batching: BatchingConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// See [`AppConfig::apply_env_overrides`] for the supported variables.
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup function.
    ///
    /// Supports the following variables:
    /// - `IPQUALITYSCORE_API_KEY`: IPQualityScore credential
    /// - `NUMVERIFY_API_KEY`: NumVerify credential
    /// - `DIDSCOPE_BIND_ADDR`: Override the HTTP bind address
    /// - `DIDSCOPE_SIMULATE`: Enable or disable the simulated fallback (true/false)
    /// - `DIDSCOPE_WINDOW_DELAY_MS`: Override the pause between batch windows
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("IPQUALITYSCORE_API_KEY") {
            self.providers.ipqs_api_key = Some(key);
        }

        if let Some(key) = lookup("NUMVERIFY_API_KEY") {
            self.providers.numverify_api_key = Some(key);
        }

        if let Some(addr) = lookup("DIDSCOPE_BIND_ADDR") {
            tracing::debug!("Override server.bind_addr from env: {}", addr);
            self.server.bind_addr = addr;
        }

        if let Some(val) = lookup("DIDSCOPE_SIMULATE") {
            if let Ok(enabled) = val.parse() {
                self.providers.simulate_when_unavailable = enabled;
                tracing::debug!("Override providers.simulate_when_unavailable from env: {}", enabled);
            }
        }

        if let Some(val) = lookup("DIDSCOPE_WINDOW_DELAY_MS") {
            if let Ok(delay) = val.parse() {
                self.batching.window_delay_ms = delay;
                tracing::debug!("Override batching.window_delay_ms from env: {}", delay);
            }
        }
    }

    /// Check values that would make the service unusable.
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("batching.max_batch_size", self.batching.max_batch_size),
            ("batching.route_window_size", self.batching.route_window_size),
            ("batching.client_window_size", self.batching.client_window_size),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind_addr".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/didscope/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "didscope", "didscope").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,
    /// Maximum accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Reputation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
    /// Generate simulated records when no provider answers
    pub simulate_when_unavailable: bool,
    /// IPQualityScore API base URL
    pub ipqs_base_url: String,
    /// NumVerify API base URL
    pub numverify_base_url: String,
    /// IPQualityScore API key (environment only)
    #[serde(skip)]
    pub ipqs_api_key: Option<String>,
    /// NumVerify API key (environment only)
    #[serde(skip)]
    pub numverify_api_key: Option<String>,
}

impl ProvidersConfig {
    /// IPQS credential, if one is set and is not the sample placeholder.
    #[must_use]
    pub fn ipqs_credential(&self) -> Option<&str> {
        usable_credential(self.ipqs_api_key.as_deref(), IPQS_KEY_PLACEHOLDER)
    }

    /// NumVerify credential, if one is set and is not the sample placeholder.
    #[must_use]
    pub fn numverify_credential(&self) -> Option<&str> {
        usable_credential(self.numverify_api_key.as_deref(), NUMVERIFY_KEY_PLACEHOLDER)
    }

    /// Outbound request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            simulate_when_unavailable: true,
            ipqs_base_url: "https://ipqualityscore.com".to_string(),
            numverify_base_url: "http://apilayer.net".to_string(),
            ipqs_api_key: None,
            numverify_api_key: None,
        }
    }
}

fn usable_credential<'a>(key: Option<&'a str>, placeholder: &str) -> Option<&'a str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && *k != placeholder)
}

/// Batch processing settings.
///
/// The HTTP bulk route checks `route_window_size` numbers at a time, while
/// interactive clients submit chunks of `client_window_size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchingConfig {
    /// Maximum numbers accepted per bulk request; extra numbers are dropped
    pub max_batch_size: usize,
    /// Numbers checked concurrently per window by the bulk route
    pub route_window_size: usize,
    /// Numbers submitted per chunk by interactive clients
    pub client_window_size: usize,
    /// Pause between windows in milliseconds
    pub window_delay_ms: u64,
}

impl BatchingConfig {
    /// Pause between windows.
    #[must_use]
    pub fn window_delay(&self) -> Duration {
        Duration::from_millis(self.window_delay_ms)
    }
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 100,
            route_window_size: 5,
            client_window_size: 10,
            window_delay_ms: 1000,
        }
    }
}
