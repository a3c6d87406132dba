// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Exported project data.
//!
//! A self-describing snapshot of one video's annotations, written next to
//! the media file on export.

use super::annotation::Line;
use super::video::VideoKey;
use serde::{Deserialize, Serialize};

/// Complete project data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub media_file: String,
    pub video_key: VideoKey,
    pub frame_width: u32,
    pub frame_height: u32,
    pub lines: Vec<Line>,
}

impl ProjectData {
    /// Create project data for the given media file and dimensions.
    pub fn new(
        media_file: String,
        video_key: VideoKey,
        frame_width: u32,
        frame_height: u32,
        lines: Vec<Line>,
    ) -> Self {
        Self {
            media_file,
            video_key,
            frame_width,
            frame_height,
            lines,
        }
    }
}
