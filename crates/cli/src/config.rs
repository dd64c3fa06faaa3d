// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is read from `config.toml` in the config directory
//! (`QUILL_CONFIG_DIR`, or the platform config dir joined with `quill`).
//! Every field is optional:
//! - `api_url`: Base URL of the blog API
//! - `state_dir`: Where the session is persisted
//! - `[cache]`: Per-kind stale times in seconds
//!
//! `QUILL_API_URL` and `QUILL_STATE_DIR` override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::sync::StaleTimes;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "quill";

/// Base URL used when neither the file nor the environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Client configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    /// Session directory. Falls back to the platform state dir when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            state_dir: None,
            cache: CacheConfig::default(),
        }
    }
}

/// Stale times for each cached query kind, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub posts_page_secs: u64,
    pub posts_by_user_secs: u64,
    pub my_posts_secs: u64,
    pub post_detail_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            posts_page_secs: 120,
            posts_by_user_secs: 60,
            my_posts_secs: 30,
            post_detail_secs: 60,
        }
    }
}

impl CacheConfig {
    pub fn stale_times(&self) -> StaleTimes {
        StaleTimes {
            posts_page: Duration::from_secs(self.posts_page_secs),
            posts_by_user: Duration::from_secs(self.posts_by_user_secs),
            my_posts: Duration::from_secs(self.my_posts_secs),
            post_detail: Duration::from_secs(self.post_detail_secs),
        }
    }
}

impl Config {
    /// Loads configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Loads the user's config file and applies environment overrides.
    pub fn load_default() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) => Self::load_or_default(&path)?,
            None => Config::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `QUILL_API_URL` and `QUILL_STATE_DIR` on top of the file values.
    pub fn apply_env(&mut self) {
        if let Some(url) = env::api_url() {
            self.api_url = url;
        }
        if let Some(dir) = env::state_dir() {
            self.state_dir = Some(dir);
        }
    }

    /// Directory holding the persisted session.
    pub fn state_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.state_dir {
            return Ok(dir.clone());
        }
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|d| d.join(APP_DIR_NAME))
            .ok_or_else(|| {
                Error::Config(
                    "cannot determine a state directory\n  hint: set QUILL_STATE_DIR".to_string(),
                )
            })
    }
}

/// Location of `config.toml`, if a config directory can be determined.
pub fn config_path() -> Option<PathBuf> {
    env::config_dir()
        .or_else(|| dirs::config_dir().map(|d| d.join(APP_DIR_NAME)))
        .map(|d| d.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
