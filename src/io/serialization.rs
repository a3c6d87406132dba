// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data serialization and deserialization.
//!
//! This module handles exporting and importing a video's lines in YAML
//! and JSON formats.

use crate::config::ExportFormat;
use crate::models::project::ProjectData;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Export project data to YAML format.
pub fn export_yaml(data: &ProjectData, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Export project data to JSON format.
pub fn export_json(data: &ProjectData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Import project data from YAML format.
pub fn import_yaml(path: &Path) -> Result<ProjectData> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import project data from JSON format.
pub fn import_json(path: &Path) -> Result<ProjectData> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Export path beside the media file: `clip.mp4` becomes `clip.mp4.lines.yaml`.
pub fn export_path_for(media: &Path, format: ExportFormat) -> PathBuf {
    let mut name = media.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".lines.{}", format.extension()));
    media.with_file_name(name)
}

/// Export in the given format.
pub fn export(data: &ProjectData, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Yaml => export_yaml(data, path),
        ExportFormat::Json => export_json(data, path),
    }
}

/// Import, choosing the format from the file extension.
pub fn import(path: &Path) -> Result<ProjectData> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => anyhow::bail!("Unsupported file extension: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{Line, Point};
    use crate::models::video::VideoKey;

    fn project() -> ProjectData {
        ProjectData::new(
            "/videos/clip.mp4".to_string(),
            VideoKey::new("clip.mp4", 100, 5),
            1920,
            1080,
            vec![Line {
                id: "l1".to_string(),
                p1: Point::new(0.25, 0.5),
                p2: Point::new(0.75, 0.5),
                created_at: 7,
            }],
        )
    }

    #[test]
    fn test_export_path_for() {
        let path = export_path_for(Path::new("/videos/clip.mp4"), ExportFormat::Yaml);
        assert_eq!(path, PathBuf::from("/videos/clip.mp4.lines.yaml"));
        let path = export_path_for(Path::new("clip.mp4"), ExportFormat::Json);
        assert_eq!(path, PathBuf::from("clip.mp4.lines.json"));
    }

    #[test]
    fn test_yaml_and_json_files_import_back() {
        let dir = tempfile::tempdir().unwrap();
        for format in [ExportFormat::Yaml, ExportFormat::Json] {
            let path = export_path_for(&dir.path().join("clip.mp4"), format);
            export(&project(), &path, format).unwrap();
            assert_eq!(import(&path).unwrap(), project());
        }
    }

    #[test]
    fn test_yaml_uses_camel_case_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.yaml");
        export_yaml(&project(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("createdAt: 7"));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        assert!(import(Path::new("lines.txt")).is_err());
    }
}
