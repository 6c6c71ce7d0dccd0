//! # Client Configuration
//!
//! Where the sale endpoint lives and how to authenticate against it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VENTA_API_URL=https://ventas.example.com/                          │
//! │     VENTA_API_TOKEN=<jwt>                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/venta/client.toml (Linux)                                │
//! │     ~/Library/Application Support/com.venta.venta/client.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://10.0.2.2:8080/ventas, 30s timeout, no token                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "http://10.0.2.2:8080/"
//! sale_path = "ventas"
//! timeout_secs = 30
//! token = "eyJhbGciOi..."
//! ```
//!
//! The token is a credential: it is never compiled in and never printed by
//! `Debug`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// API Settings
// =============================================================================

/// Connection settings for the sales backend.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Root URL of the backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the sale endpoint, relative to `base_url`.
    #[serde(default = "default_sale_path")]
    pub sale_path: String,

    /// Connect/read/write timeout applied by the transport (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token sent in the `Authorization` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    // Host loopback as seen from the Android emulator
    "http://10.0.2.2:8080/".to_string()
}

fn default_sale_path() -> String {
    "ventas".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            sale_path: default_sale_path(),
            timeout_secs: default_timeout(),
            token: None,
        }
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("sale_path", &self.sale_path)
            .field("timeout_secs", &self.timeout_secs)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiSettings {
    /// Full URL of the sale endpoint.
    ///
    /// `base_url` is treated as a directory whether or not it ends in `/`.
    pub fn sale_endpoint(&self) -> ConfigResult<Url> {
        let mut base = Url::parse(&self.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(self.sale_path.trim_start_matches('/'))?)
    }

    /// Transport timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Sales backend settings.
    #[serde(default)]
    pub api: ApiSettings,
}

impl ClientConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        if config.api.token.is_none() {
            warn!("No API token configured; sales will be sent unauthenticated");
        }

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.sale_path.trim_matches('/').is_empty() {
            return Err(ConfigError::InvalidConfig("sale_path must not be empty".into()));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if matches!(self.api.token.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err(ConfigError::InvalidConfig("token must not be blank".into()));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`ClientConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VENTA_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(path) = lookup("VENTA_SALE_PATH") {
            self.api.sale_path = path;
        }

        if let Some(token) = lookup("VENTA_API_TOKEN") {
            debug!("Overriding API token from environment");
            self.api.token = Some(token);
        }

        if let Some(timeout) = lookup("VENTA_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid VENTA_TIMEOUT_SECS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "venta", "venta")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }
}
