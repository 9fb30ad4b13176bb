// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors

use anyhow::Result;

/// Show resolved configuration, one key or all of it.
///
/// Configuration is derived from the environment; point KINTREE_DATA_DIR
/// elsewhere to move the store.
pub fn run(key: Option<&str>) -> Result<()> {
    let config = crate::config::load()?;

    match key {
        Some("data_dir") => println!("{}", config.data_dir.display()),
        Some("cache_dir") => println!("{}", config.cache_dir.display()),
        Some("log_level") => println!("{}", config.log_level),
        Some(other) => {
            anyhow::bail!(
                "Unknown config key: {}. Valid: data_dir, cache_dir, log_level",
                other
            );
        }
        None => {
            println!("data_dir = {}", config.data_dir.display());
            println!("cache_dir = {}", config.cache_dir.display());
            println!("log_level = {}", config.log_level);
        }
    }

    Ok(())
}
