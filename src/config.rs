// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Read from the YAML file named by `FRAMELINES_CONFIG`. Every field is
//! optional; missing fields take their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::editing::hit_test::{DEFAULT_HANDLE_HIT_RADIUS, DEFAULT_LINE_HIT_THRESHOLD};
use crate::editing::history::DEFAULT_HISTORY_LIMIT;
use crate::editing::{EditorSettings, HitThresholds};

/// Environment variable holding the config file path.
pub const CONFIG_ENV: &str = "FRAMELINES_CONFIG";

/// File format used by annotation export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Yaml,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Yaml => "yaml",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pixel radius around an endpoint that grabs the handle.
    pub handle_hit_radius: f64,
    /// Pixel distance from a line body that grabs the whole line.
    pub line_hit_threshold: f64,
    /// Entries kept on each of the undo and redo stacks.
    pub history_limit: usize,
    /// JSON file holding every video's lines.
    pub store_path: PathBuf,
    pub export_format: ExportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            handle_hit_radius: DEFAULT_HANDLE_HIT_RADIUS,
            line_hit_threshold: DEFAULT_LINE_HIT_THRESHOLD,
            history_limit: DEFAULT_HISTORY_LIMIT,
            store_path: default_store_path(),
            export_format: ExportFormat::Yaml,
        }
    }
}

impl Config {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load the config named by `FRAMELINES_CONFIG`, falling back to
    /// defaults when unset or unreadable.
    pub fn load() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)).unwrap_or_else(|e| {
                log::error!("{:#}; using default configuration", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            thresholds: HitThresholds {
                handle_radius: self.handle_hit_radius,
                line_threshold: self.line_hit_threshold,
            },
            history_limit: self.history_limit,
        }
    }
}

/// `%APPDATA%\framelines` on Windows, `~/.local/share/framelines` elsewhere.
pub fn default_store_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    let base = std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir());
    #[cfg(not(target_os = "windows"))]
    let base = std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".local").join("share"))
        .unwrap_or_else(|_| std::env::temp_dir());
    base.join("framelines").join("annotations.json")
}
