use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// History storage and sync config
    #[serde(default)]
    pub history: HistoryConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; falls back to the GEMINI_API_KEY environment variable
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL (optional, for proxies or self-hosted gateways)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Max concurrent requests in batch flows
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,
}

impl ProviderConfig {
    /// API key from the config file, or from GEMINI_API_KEY when unset
    pub fn resolve_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("GEMINI_API_KEY").unwrap_or_default()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
            concurrent_requests: default_concurrent_requests(),
        }
    }
}

/// History storage and cross-instance sync configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HistoryConfig {
    /// Database file path; None uses the per-user data directory
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Whether peer instances are notified of changes
    #[serde(default = "default_true")]
    pub cross_instance_sync: bool,

    /// Poll interval for the change marker, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            cross_instance_sync: default_true(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Normal operation logging
    #[default]
    Info,
    /// Verbose debugging
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            provider: ProviderConfig::default(),
            history: HistoryConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, writing a default file if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("source_language must not be empty"));
        }
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("target_language must not be empty"));
        }
        if self.provider.model.trim().is_empty() {
            return Err(anyhow!("provider.model must not be empty"));
        }
        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("provider.timeout_secs must be greater than zero"));
        }
        if self.provider.concurrent_requests == 0 {
            return Err(anyhow!(
                "provider.concurrent_requests must be greater than zero"
            ));
        }
        if self.history.poll_interval_ms == 0 {
            return Err(anyhow!("history.poll_interval_ms must be greater than zero"));
        }
        Ok(())
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "ukr".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_concurrent_requests() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    250
}
