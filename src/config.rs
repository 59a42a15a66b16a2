//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "POINTAGE_API_URL";

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub kiosk: KioskConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

/// REST API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Self-service kiosk behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    /// Idle delay before a phone lookup is sent.
    pub debounce_ms: u64,
    /// Characters required before any lookup.
    pub min_search_len: usize,
    /// Delay before the kiosk resets after a successful pointage.
    pub reset_delay_secs: u64,
}

/// Administration console settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Page size requested for the movement history.
    pub movements_limit: u32,
    /// How long status messages stay visible.
    pub message_timeout_secs: u64,
    /// Directory exports are written to. Empty means the user's download folder.
    pub export_dir: String,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "API URL must start with http:// or https://".to_string(),
            ));
        }
        if self.api.timeout_secs < 1 {
            return Err(ConfigError::Validation("API timeout must be at least 1 second".to_string()));
        }
        if self.kiosk.min_search_len < 1 {
            return Err(ConfigError::Validation(
                "Minimum search length must be at least 1".to_string(),
            ));
        }
        if self.admin.movements_limit < 1 {
            return Err(ConfigError::Validation("Movements limit must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Apply the `--api-url` flag or the environment override, flag first.
    pub fn apply_overrides(&mut self, cli_url: Option<String>, env_url: Option<String>) {
        let given = |u: &String| !u.trim().is_empty();
        if let Some(url) = cli_url.filter(given).or(env_url.filter(given)) {
            tracing::info!("API URL overridden: {}", url);
            self.api.base_url = url;
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl AdminConfig {
    /// Resolve the export directory.
    pub fn export_dir(&self) -> PathBuf {
        if !self.export_dir.trim().is_empty() {
            return PathBuf::from(&self.export_dir);
        }
        directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_search_len: 3,
            reset_delay_secs: 3,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            movements_limit: 100,
            message_timeout_secs: 4,
            export_dir: String::new(),
        }
    }
}
