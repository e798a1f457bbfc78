//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which covers the data source URL, the deterministic pagination seed, and
//! the per-page batch size.
//!
//! Configuration is stored at `~/.config/userdex/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "userdex";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default data source.
const DEFAULT_API_URL: &str = "https://randomuser.me/api";

/// Fixed seed so a given page number always yields the same records.
const DEFAULT_SEED: &str = "awork";

/// Records per page. Large on purpose: the transform worker exists so this
/// much data can be grouped without stalling the caller.
const DEFAULT_PAGE_SIZE: u32 = 5000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_seed")]
    pub seed: String,
    #[serde(default = "default_page_size")]
    pub results_per_page: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_seed() -> String {
    DEFAULT_SEED.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            seed: default_seed(),
            results_per_page: default_page_size(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the durable page mirror. `None` degrades the cache to
    /// memory-only rather than failing.
    pub fn cache_dir(&self) -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join(APP_NAME))
    }
}
