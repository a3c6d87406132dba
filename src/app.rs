// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait. It owns the open media and its transport, and
//! routes toolbar, keyboard and canvas input into the annotation session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::editing::keyboard::EditorKey;
use crate::io::media::{open_media, FrameSource};
use crate::io::serialization;
use crate::io::store::JsonFileStore;
use crate::models::project::ProjectData;
use crate::models::transport::{Mode, Transport};
use crate::models::video::VideoKey;
use crate::session::Session;
use crate::ui::{canvas, timeline, toolbar};

/// The open media file and its display state.
struct LoadedMedia {
    path: PathBuf,
    key: VideoKey,
    source: Box<dyn FrameSource>,
    transport: Transport,
    texture: Option<egui::TextureHandle>,
    /// Frame index currently uploaded to `texture`.
    shown_frame: Option<usize>,
}

/// Main application state.
pub struct FramelinesApp {
    config: Config,
    session: Session,
    media: Option<LoadedMedia>,
}

impl FramelinesApp {
    /// Create the application, opening `initial` if given.
    pub fn new(config: Config, initial: Option<PathBuf>) -> Self {
        log::info!("Storing annotations in {}", config.store_path.display());
        let store = Arc::new(JsonFileStore::new(config.store_path.clone()));
        let session = Session::new(store, config.editor_settings());
        let mut app = Self {
            config,
            session,
            media: None,
        };
        if let Some(path) = initial {
            if let Err(e) = app.open(&path) {
                log::error!("Failed to open {}: {:#}", path.display(), e);
            }
        }
        app
    }

    /// Open a media file and start loading its saved lines.
    fn open(&mut self, path: &Path) -> Result<()> {
        let key = VideoKey::from_path(path)?;
        let source = open_media(path)?;
        let (width, height) = source.dimensions();
        log::info!(
            "Opened {} ({}x{}, {} frames)",
            path.display(),
            width,
            height,
            source.frame_count()
        );

        let transport = Transport::new(source.frame_count(), source.fps());
        self.session.open_video(key.clone());
        self.media = Some(LoadedMedia {
            path: path.to_path_buf(),
            key,
            source,
            transport,
            texture: None,
            shown_frame: None,
        });
        Ok(())
    }

    /// Upload the transport's current frame if it is not already shown.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        let index = media.transport.current_frame();
        if media.shown_frame == Some(index) {
            return;
        }
        match media.source.frame(index) {
            Ok(frame) => {
                let size = [frame.width as usize, frame.height as usize];
                let image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.pixels);
                match media.texture.as_mut() {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        media.texture =
                            Some(ctx.load_texture("video_frame", image, egui::TextureOptions::LINEAR));
                    }
                }
            }
            Err(e) => log::error!("Failed to show frame {}: {:#}", index, e),
        }
        media.shown_frame = Some(index);
    }

    /// Export the current video's lines next to the media file.
    fn export_lines(&self) {
        let Some(media) = self.media.as_ref() else {
            return;
        };
        let (width, height) = media.source.dimensions();
        let data = ProjectData::new(
            media.path.to_string_lossy().to_string(),
            media.key.clone(),
            width,
            height,
            self.session.editor().lines().to_vec(),
        );
        let format = self.config.export_format;
        let path = serialization::export_path_for(&media.path, format);
        match serialization::export(&data, &path, format) {
            Ok(()) => log::info!("Exported {} lines to {}", data.lines.len(), path.display()),
            Err(e) => log::error!("Failed to export lines: {:#}", e),
        }
    }

    fn handle_toolbar(&mut self, action: toolbar::ToolbarAction) {
        match action {
            toolbar::ToolbarAction::SetMode(mode) => {
                if mode == Mode::Draw {
                    if let Some(media) = self.media.as_mut() {
                        media.transport.pause();
                    }
                }
                self.session.set_mode(mode);
            }
            toolbar::ToolbarAction::Undo => self.session.undo(),
            toolbar::ToolbarAction::Redo => self.session.redo(),
            toolbar::ToolbarAction::DeleteSelected => self.session.delete_selected(),
            toolbar::ToolbarAction::Export => self.export_lines(),
            toolbar::ToolbarAction::None => {}
        }
    }
}

impl eframe::App for FramelinesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Saved lines for the open video
        if self.session.poll_load() {
            ctx.request_repaint();
        }
        if self.session.is_loading() {
            ctx.request_repaint();
        }

        // Playback
        let dt = ctx.input(|i| i.stable_dt) as f64;
        if let Some(media) = self.media.as_mut() {
            if media.transport.is_playing() {
                // Lines can't be edited while frames are changing underneath.
                self.session.set_mode(Mode::View);
                media.transport.advance(dt);
                ctx.request_repaint();
            }
        }
        self.refresh_texture(ctx);

        // Toolbar
        let toolbar_state = toolbar::ToolbarState {
            mode: self.session.mode(),
            can_undo: self.session.editor().can_undo(),
            can_redo: self.session.editor().can_redo(),
            has_selection: self.session.editor().selected_id().is_some(),
            has_video: self.media.is_some(),
            loading: self.session.is_loading(),
        };
        let action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &toolbar_state))
            .inner;
        self.handle_toolbar(action);

        // Transport
        if let Some(media) = self.media.as_mut() {
            egui::TopBottomPanel::bottom("timeline").show(ctx, |ui| {
                timeline::show(ui, &mut media.transport);
            });
            if media.transport.is_playing() {
                self.session.set_mode(Mode::View);
            }
        }

        // Handle Delete key to delete the selected line
        // Text fields keep their normal editing keys
        let key = ctx.input(|i| {
            if i.key_pressed(egui::Key::Delete) {
                Some(EditorKey::Delete)
            } else if i.key_pressed(egui::Key::Backspace) {
                Some(EditorKey::Backspace)
            } else {
                None
            }
        });
        if let Some(key) = key {
            self.session.key(key, ctx.wants_keyboard_input());
        }

        // Main canvas (center)
        let output = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let media = self.media.as_ref();
                canvas::show(
                    ui,
                    self.session.editor(),
                    media.and_then(|m| m.texture.as_ref()),
                    media.map(|m| m.source.dimensions()),
                )
            })
            .inner;

        self.session.set_bounds(output.bounds);
        if !output.inputs.is_empty() {
            for input in output.inputs {
                self.session.pointer(input);
            }
            ctx.request_repaint();
        }
    }
}
