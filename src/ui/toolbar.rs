// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and mode selection UI.
//!
//! This module provides the toolbar for switching between viewing and
//! drawing, and for the edit commands.

use crate::models::transport::Mode;

/// What the editor can currently do, for enabling buttons.
pub struct ToolbarState {
    pub mode: Mode,
    pub can_undo: bool,
    pub can_redo: bool,
    pub has_selection: bool,
    pub has_video: bool,
    pub loading: bool,
}

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    SetMode(Mode),
    Undo,
    Redo,
    DeleteSelected,
    Export,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, state: &ToolbarState) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");

        if ui.selectable_label(state.mode == Mode::View, "👁 View").clicked() {
            action = ToolbarAction::SetMode(Mode::View);
        }
        if ui
            .add_enabled(
                state.has_video,
                egui::SelectableLabel::new(state.mode == Mode::Draw, "⟋ Draw"),
            )
            .clicked()
        {
            action = ToolbarAction::SetMode(Mode::Draw);
        }

        ui.separator();

        let editable = !state.loading;
        if ui.add_enabled(editable && state.can_undo, egui::Button::new("Undo")).clicked() {
            action = ToolbarAction::Undo;
        }
        if ui.add_enabled(editable && state.can_redo, egui::Button::new("Redo")).clicked() {
            action = ToolbarAction::Redo;
        }
        if ui
            .add_enabled(editable && state.has_selection, egui::Button::new("Delete"))
            .clicked()
        {
            action = ToolbarAction::DeleteSelected;
        }

        ui.separator();

        if ui.add_enabled(state.has_video, egui::Button::new("Export")).clicked() {
            action = ToolbarAction::Export;
        }

        ui.separator();

        let hint = if state.loading {
            "Loading saved lines..."
        } else {
            match state.mode {
                Mode::View => "Switch to Draw to add or edit lines",
                Mode::Draw => "Drag to draw, drag ends or lines to edit, Delete removes the selection",
            }
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
