// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//
//! Command implementations

use anyhow::Result;
use std::path::PathBuf;

pub mod check;
pub mod classify;
pub mod completions;
pub mod config;
pub mod export;
pub mod import;
pub mod person;
pub mod relate;
pub mod timeline;

/// Resolve the data directory holding the family store.
///
/// `KINTREE_DATA_DIR` wins; otherwise the platform data dir, falling back
/// to `.kintree` under the working directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("KINTREE_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let data_dir = directories::ProjectDirs::from("org", "kintree", "kintree")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".kintree")
        });

    Ok(data_dir)
}
