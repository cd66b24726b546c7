use anyhow::{Context, Result};
use doctor_directory::{FetchPolicy, DEFAULT_DIRECTORY_URL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "docsyne-tui";
const API_URL_ENV: &str = "DOCSYNE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocsyneConfig {
    /// URL of the JSON doctor listing
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Total tries per load, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Retry n waits n times this long
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Log file; defaults to docsyne.log in the user data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    DEFAULT_DIRECTORY_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for DocsyneConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            log_file: None,
        }
    }
}

impl DocsyneConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR)
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    /// `DOCSYNE_API_URL` overrides the listing URL either way.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::from_toml(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_api_url_override(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_api_url_override(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Write a default config file unless one exists. Returns its path.
    pub fn ensure_default_file() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::default()
                .save()
                .with_context(|| format!("Failed to write config at {}", path.display()))?;
        }
        Ok(path)
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            timeout: Duration::from_secs(self.request_timeout_secs),
            max_attempts: self.max_attempts,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(dirs::data_local_dir()
                .context("Cannot determine data directory")?
                .join(APP_DIR)
                .join("docsyne.log")),
        }
    }
}
