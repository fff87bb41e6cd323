//! Application configuration management.
//!
//! The config holds the one tunable this tool has: the menu endpoint URL.
//! It is stored at `~/.config/menucache/config.json`; the `MENUCACHE_URL`
//! environment variable wins over the file, and the canonical endpoint is
//! the fallback.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "menucache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Canonical menu endpoint: one GET returning a JSON array of menu items.
const DEFAULT_MENU_URL: &str = "https://data.mazedanetworks.net/apis/menu.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub menu_url: Option<String>,
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

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir =
            dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Resolve the menu endpoint: env var, then config file, then default.
    pub fn menu_url(&self) -> String {
        std::env::var("MENUCACHE_URL")
            .ok()
            .or_else(|| self.menu_url.clone())
            .unwrap_or_else(|| DEFAULT_MENU_URL.to_string())
    }
}
