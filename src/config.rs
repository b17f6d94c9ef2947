use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

const DB_ENV: &str = "STUDY_TRACKER_DB";
const BIND_ENV: &str = "STUDY_TRACKER_BIND";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("study-tracker");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("tracker.db").to_string_lossy().to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            bind_address: default_bind_address(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads the config at `path`, writing a default one there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("study-tracker")
            .join("config.toml")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(db_path) = std::env::var(DB_ENV) {
            tracing::info!("{} set, using database {}", DB_ENV, db_path);
            self.db_path = db_path;
        }
        if let Ok(bind_address) = std::env::var(BIND_ENV) {
            tracing::info!("{} set, binding to {}", BIND_ENV, bind_address);
            self.bind_address = bind_address;
        }
    }
}
