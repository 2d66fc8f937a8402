//! Configuration management for UGC Prompt Studio
//!
//! Config stored at: ~/.config/ugc-prompt-studio/config.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use ugc_store::DEFAULT_QUOTA_BYTES;
use ugc_types::{ConfigError, OutputFormat, Result};

const APP_DIR: &str = "ugc-prompt-studio";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the image analysis server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Directory holding `locations.json`, `actors.json` and `faq.json`
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,

    /// Server serving `/static/data/*.json`; takes precedence over `catalog_dir`
    #[serde(default)]
    pub catalog_url: Option<String>,

    /// Timeout for analysis requests
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Auto-save interval
    #[serde(default = "default_autosave_interval_secs")]
    pub autosave_interval_secs: u64,

    /// Delay before moving to the actor step after a product analysis
    #[serde(default = "default_auto_advance_delay_ms")]
    pub auto_advance_delay_ms: u64,

    /// Byte quota of the local store
    #[serde(default = "default_storage_quota_bytes")]
    pub storage_quota_bytes: usize,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Local store directory override
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_autosave_interval_secs() -> u64 {
    30
}

fn default_auto_advance_delay_ms() -> u64 {
    2000
}

fn default_storage_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            catalog_dir: None,
            catalog_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            autosave_interval_secs: default_autosave_interval_secs(),
            auto_advance_delay_ms: default_auto_advance_delay_ms(),
            storage_quota_bytes: default_storage_quota_bytes(),
            output_format: default_output_format(),
            store_dir: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the local store directory
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs.max(1))
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "UGC Prompt Studio Configuration")?;
        writeln!(f, "===============================")?;
        writeln!(f)?;
        writeln!(f, "Server URL:         {}", self.server_url)?;
        writeln!(
            f,
            "Catalog URL:        {}",
            self.catalog_url.as_deref().unwrap_or("(none)")
        )?;
        writeln!(
            f,
            "Catalog dir:        {}",
            self.catalog_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f, "Request timeout:    {} s", self.request_timeout_secs)?;
        writeln!(f, "Auto-save interval: {} s", self.autosave_interval_secs)?;
        writeln!(f, "Auto-advance delay: {} ms", self.auto_advance_delay_ms)?;
        writeln!(f, "Storage quota:      {} bytes", self.storage_quota_bytes)?;
        writeln!(f, "Output format:      {}", self.output_format)?;
        writeln!(
            f,
            "Store dir:          {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:        {}", path.display())?;
        }

        Ok(())
    }
}
