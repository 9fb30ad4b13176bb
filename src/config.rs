// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//! Configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for persistent data (the family store)
    pub data_dir: std::path::PathBuf,
    /// Directory for cached data
    pub cache_dir: std::path::PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: directories::ProjectDirs::from("org", "kintree", "kintree")
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| std::path::PathBuf::from("~/.local/share/kintree")),
            cache_dir: directories::ProjectDirs::from("org", "kintree", "kintree")
                .map(|d| d.cache_dir().to_path_buf())
                .unwrap_or_else(|| std::path::PathBuf::from("~/.cache/kintree")),
            log_level: "info".to_string(),
        }
    }
}

/// Load configuration from the environment or use defaults
pub fn load() -> Result<Config> {
    let mut config = Config::default();
    if let Ok(dir) = std::env::var("KINTREE_DATA_DIR") {
        config.data_dir = std::path::PathBuf::from(dir);
    }
    Ok(config)
}
