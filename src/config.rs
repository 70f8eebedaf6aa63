//! Configuration management for the token icon service
//!
//! Handles loading and validation of application configuration from TOML files.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_enable_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub backtrace: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Minimum time between accepted sync attempts for one network, in milliseconds
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// Base URL of the token list provider
    #[serde(default = "default_provider_url")]
    pub provider_url: String,
    /// HTTP timeout for a single provider call in seconds
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

const fn default_cooldown_ms() -> u64 {
    60_000 // 1 minute
}

fn default_provider_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

const fn default_provider_timeout() -> u64 {
    300 // a full list sync can take minutes
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
            provider_url: default_provider_url(),
            provider_timeout_secs: default_provider_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Object store base URL, e.g. <https://bucket.s3.amazonaws.com/tokens>
    #[serde(default)]
    pub remote_base_url: Option<String>,
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout_secs: u64,
    /// Local cache directory laid out as `<dir>/<network>/<address>.<ext>`
    #[serde(default = "default_local_dir")]
    pub local_dir: String,
    /// Placeholder image path (embedded SVG when unset)
    #[serde(default)]
    pub default_icon: Option<String>,
}

const fn default_remote_timeout() -> u64 {
    5
}

fn default_local_dir() -> String {
    "tokens".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            remote_base_url: None,
            remote_timeout_secs: default_remote_timeout(),
            local_dir: default_local_dir(),
            default_icon: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// - File I/O errors (file not found, permission denied, invalid path)
    /// - TOML parsing errors (invalid syntax, type mismatches)
    /// - Validation errors (empty local directory, zero port)
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(crate::TokenIconError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content).map_err(crate::TokenIconError::TomlParsing)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    ///
    /// # Errors
    /// - No config file found (neither config.toml nor config.example.toml exists)
    /// - File I/O or TOML parsing errors
    pub fn load() -> crate::Result<Self> {
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::TokenIconError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::TokenIconError::ConfigError(
                "server.port must be greater than zero".to_string(),
            ));
        }
        if self.storage.local_dir.trim().is_empty() {
            return Err(crate::TokenIconError::ConfigError(
                "storage.local_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize the effective configuration back to TOML
    pub fn to_toml_string(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the per-network sync cooldown
    #[must_use]
    pub const fn sync_cooldown(&self) -> Duration {
        Duration::from_millis(self.sync.cooldown_ms)
    }

    /// Get the provider request timeout
    #[must_use]
    pub const fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.sync.provider_timeout_secs)
    }

    /// Get the remote object store timeout
    #[must_use]
    pub const fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.storage.remote_timeout_secs)
    }
}
