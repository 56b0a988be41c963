use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Public feed consumed when no override is configured.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/agvanguard/HBL-Dashboard/refs/heads/main/public/data.csv";

/// Top-level configuration loaded from `~/.hbl-dash/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from `~/.hbl-dash/config.toml`, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(path)
        } else {
            let cfg = Config::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let cfg: Config = toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        self.validate()?;
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Semantic validation for settings that are not expressible via type checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.source.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation(
                "source.url must not be empty".into(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "source.url must be an http(s) URL, got: {url}"
            )));
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::Validation("ui.tick_ms must be positive".into()));
        }
        Ok(())
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hbl-dash")
            .join("config.toml")
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(String),
    #[error("parse: {0}")]
    Parse(String),
    #[error("validation: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Section structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the CSV feed.
    #[serde(default = "default_source_url")]
    pub url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
        }
    }
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval of the render loop, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_tick_ms() -> u64 {
    250
}
