// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation session for the open video.
//!
//! Ties the editor to persistence and the interaction mode: pointer input
//! only reaches the editor in draw mode once the video's saved lines have
//! arrived, and every committed change is queued for saving.

use std::sync::Arc;

use crate::editing::keyboard::{handle_key, EditorKey};
use crate::editing::{DrawingState, EditorSettings, VideoBounds};
use crate::io::bridge::{LoadResult, PersistenceBridge};
use crate::io::store::AnnotationStore;
use crate::models::annotation::Point;
use crate::models::transport::Mode;
use crate::models::video::VideoKey;

/// Pointer input already mapped to normalized video coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down { point: Option<Point>, secondary: bool },
    Move(Option<Point>),
    Up,
}

pub struct Session {
    editor: DrawingState,
    bridge: PersistenceBridge,
    video: Option<VideoKey>,
    mode: Mode,
    /// Editor revision last handed to the bridge, or loaded from it.
    saved_revision: u64,
}

impl Session {
    pub fn new(store: Arc<dyn AnnotationStore>, settings: EditorSettings) -> Self {
        let editor = DrawingState::new(settings);
        let saved_revision = editor.revision();
        Self {
            editor,
            bridge: PersistenceBridge::new(store),
            video: None,
            mode: Mode::View,
            saved_revision,
        }
    }

    pub fn editor(&self) -> &DrawingState {
        &self.editor
    }

    pub fn video(&self) -> Option<&VideoKey> {
        self.video.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.bridge.is_loading()
    }

    /// True when pointer input edits lines.
    pub fn accepts_drawing(&self) -> bool {
        self.mode == Mode::Draw && self.video.is_some() && !self.bridge.is_loading()
    }

    /// Switch to `key`'s video. Reopening the current video keeps its
    /// lines and history.
    pub fn open_video(&mut self, key: VideoKey) {
        if self.video.as_ref() == Some(&key) {
            return;
        }
        log::info!("Opening annotations for {}", key);
        self.flush();
        self.editor.reset(Vec::new());
        self.saved_revision = self.editor.revision();
        self.bridge.begin_load(&key);
        self.video = Some(key);
    }

    /// Apply a finished load, if one arrived. Returns true if lines changed.
    pub fn poll_load(&mut self) -> bool {
        match self.bridge.poll() {
            Some(result) => self.apply_load(result),
            None => false,
        }
    }

    /// Block until the pending load finishes.
    pub fn wait_for_load(&mut self) -> bool {
        match self.bridge.wait() {
            Some(result) => self.apply_load(result),
            None => false,
        }
    }

    fn apply_load(&mut self, result: LoadResult) -> bool {
        if self.video.as_ref() != Some(&result.key) {
            return false;
        }
        self.editor.reset(result.lines);
        self.saved_revision = self.editor.revision();
        true
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if mode == Mode::View {
            self.editor.clear_interaction();
        }
        log::debug!("Mode: {:?}", mode);
    }

    pub fn set_bounds(&mut self, bounds: Option<VideoBounds>) {
        self.editor.set_bounds(bounds);
    }

    /// Feed pointer input to the editor. Ignored unless drawing is allowed.
    pub fn pointer(&mut self, input: PointerInput) {
        if !self.accepts_drawing() {
            return;
        }
        match input {
            PointerInput::Down { point, secondary } => self.editor.pointer_down(point, secondary),
            PointerInput::Move(point) => self.editor.pointer_move(point),
            PointerInput::Up => self.editor.pointer_up(),
        }
        self.flush();
    }

    pub fn key(&mut self, key: EditorKey, text_input_focused: bool) {
        if self.is_loading() {
            return;
        }
        if handle_key(&mut self.editor, key, text_input_focused) {
            self.flush();
        }
    }

    pub fn undo(&mut self) {
        if self.is_loading() {
            return;
        }
        self.editor.undo();
        self.flush();
    }

    pub fn redo(&mut self) {
        if self.is_loading() {
            return;
        }
        self.editor.redo();
        self.flush();
    }

    pub fn delete_selected(&mut self) {
        if self.is_loading() {
            return;
        }
        self.editor.delete_selected();
        self.flush();
    }

    /// Queue a save if committed lines changed since the last one.
    fn flush(&mut self) {
        if self.editor.revision() == self.saved_revision {
            return;
        }
        if let Some(key) = self.video.as_ref() {
            self.bridge.save(key, self.editor.lines());
        }
        self.saved_revision = self.editor.revision();
    }
}
