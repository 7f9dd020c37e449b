//! Configuration management for Fluxify
//!
//! Handles config file loading and API key resolution.
//! Config is stored at ~/.config/fluxify/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::api::tmdb::DEFAULT_LANGUAGE;
use crate::store::favorites::FavoritesStore;
use crate::store::synthesis::DEFAULT_DELAY;

/// Environment variable overriding the configured key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No TMDB API key configured (set {API_KEY_ENV} or tmdb_api_key in the config file)")]
    MissingApiKey,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 key or v4 read token
    pub tmdb_api_key: Option<String>,
    /// Locale sent with every request (e.g. "en-US")
    pub language: Option<String>,
    /// Override for the favorites file location
    pub favorites_path: Option<PathBuf>,
    /// Artificial synthesis delay in milliseconds
    pub synthesis_delay_ms: Option<u64>,
}

impl Config {
    /// Get config file path (~/.config/fluxify/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fluxify").join("config.toml"))
    }

    /// Load config from `path` (default path when `None`)
    ///
    /// A missing file gives defaults; an unparsable one is logged and
    /// also gives defaults.
    pub fn load_from(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::path) else {
            return Self::default();
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            Self::default()
        })
    }

    /// API key: environment variable first, then the config file
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.tmdb_api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn favorites_path(&self) -> Option<PathBuf> {
        self.favorites_path
            .clone()
            .or_else(FavoritesStore::default_path)
    }

    pub fn synthesis_delay(&self) -> Duration {
        self.synthesis_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DELAY)
    }
}
