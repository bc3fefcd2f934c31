//! CLI configuration
//!
//! TOML file at `~/.geolabel/config.toml` (or `config.<profile>.toml`);
//! every field can be overridden by flag or environment variable.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot find home directory")]
    NoHome,
    #[error("cannot read {path}: {detail}")]
    Read { path: String, detail: String },
    #[error("invalid config {path}: {detail}")]
    Parse { path: String, detail: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Registry API server URL
    pub api_url: Option<String>,
    /// Bearer token for the registry
    pub token: Option<String>,
    /// Path to the MaxMind City database file
    pub db: Option<String>,
    /// Skip TLS certificate verification
    pub insecure: Option<bool>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self, ConfigError> {
        let path = Self::config_path(profile)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            detail: e.to_string(),
        })
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".geolabel").join(filename))
    }
}
