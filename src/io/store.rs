// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-video line storage.
//!
//! A key-value store from [`VideoKey`] to the full list of that video's
//! lines. Saves replace the whole list.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::annotation::Line;
use crate::models::video::VideoKey;

/// Storage backend for persisted lines.
pub trait AnnotationStore: Send + Sync {
    /// Replace the lines stored for `key`.
    fn save(&self, key: &VideoKey, lines: &[Line]) -> Result<()>;

    /// Lines stored for `key`, or `None` if the video has never been saved.
    fn load(&self, key: &VideoKey) -> Result<Option<Vec<Line>>>;
}

/// All videos' lines in a single JSON document on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

type Document = BTreeMap<VideoKey, Vec<Line>>;

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::new());
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let document = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(document)
    }

    fn write_document(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(document)?;
        // Write beside the target and rename so a crash never truncates the store.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl AnnotationStore for JsonFileStore {
    fn save(&self, key: &VideoKey, lines: &[Line]) -> Result<()> {
        let mut document = self.read_document()?;
        document.insert(key.clone(), lines.to_vec());
        self.write_document(&document)
    }

    fn load(&self, key: &VideoKey) -> Result<Option<Vec<Line>>> {
        Ok(self.read_document()?.remove(key))
    }
}

/// Process-local store, used in tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<VideoKey, Vec<Line>>>,
}

impl AnnotationStore for MemoryStore {
    fn save(&self, key: &VideoKey, lines: &[Line]) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        entries.insert(key.clone(), lines.to_vec());
        Ok(())
    }

    fn load(&self, key: &VideoKey) -> Result<Option<Vec<Line>>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }
}
