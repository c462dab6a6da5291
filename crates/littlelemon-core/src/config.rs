//! Application configuration management.
//!
//! Holds the remote menu location and where local state lives. Stored at
//! `~/.config/littlelemon/config.json`; every field has a default, so a
//! missing file is not an error. `LITTLELEMON_MENU_URL` and
//! `LITTLELEMON_DATA_DIR` override the file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "littlelemon";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// SQLite file holding the menu table
pub const DATABASE_FILE: &str = "LittleLemonDB.db";

/// Key-value store file holding the profile
pub const KV_FILE: &str = "storage.json";

pub const DEFAULT_MENU_URL: &str =
    "https://raw.githubusercontent.com/Meta-Mobile-Developer-PC/Working-With-Data-API/main/capstone.json";

pub const DEFAULT_IMAGE_BASE_URL: &str =
    "https://github.com/Meta-Mobile-Developer-PC/Working-With-Data-API/blob/main/images";

const ENV_MENU_URL: &str = "LITTLELEMON_MENU_URL";
const ENV_DATA_DIR: &str = "LITTLELEMON_DATA_DIR";

fn default_menu_url() -> String {
    DEFAULT_MENU_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_menu_url")]
    pub menu_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu_url: default_menu_url(),
            image_base_url: default_image_base_url(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from an environment lookup.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_MENU_URL).filter(|v| !v.is_empty()) {
            self.menu_url = url;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        self
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the database, the key-value file and logs.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(DATABASE_FILE))
    }

    pub fn kv_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(KV_FILE))
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }
}
