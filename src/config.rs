//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_API_URI: &str = "http://localhost:8080";

/// Environment variable that overrides the configured API URI.
pub const API_URI_ENV: &str = "TASKDECK_API_URI";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend root; the task collection lives at `<uri>/tasks`
    #[serde(default = "default_api_uri")]
    pub uri: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            uri: default_api_uri(),
        }
    }
}

fn default_api_uri() -> String {
    DEFAULT_API_URI.to_string()
}

pub fn get_app_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not find config directory")?;
    Ok(base.join("taskdeck"))
}

fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(config)
    }

    /// Resolve the API root: an explicit value wins over the file setting.
    pub fn api_uri(&self, explicit: Option<&str>) -> String {
        let uri = explicit
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.api.uri);
        uri.trim_end_matches('/').to_string()
    }

    /// URL of the task collection.
    pub fn tasks_url(&self, explicit: Option<&str>) -> String {
        format!("{}/tasks", self.api_uri(explicit))
    }
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}
