// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video timeline scrubber control.
//!
//! This module provides the frame slider, frame stepping, play/pause and
//! playback rate controls.

use crate::models::transport::{Transport, MAX_RATE, MIN_RATE};

/// Display the transport controls. Returns true if the frame changed.
pub fn show(ui: &mut egui::Ui, transport: &mut Transport) -> bool {
    let start = transport.current_frame();

    ui.horizontal(|ui| {
        if ui.button("⏮").on_hover_text("Previous frame").clicked() {
            transport.step_back();
        }
        let play_label = if transport.is_playing() { "⏸" } else { "▶" };
        if ui.button(play_label).clicked() {
            transport.toggle_play();
        }
        if ui.button("⏭").on_hover_text("Next frame").clicked() {
            transport.step_forward();
        }

        let mut frame = transport.current_frame();
        let last = transport.frame_count().saturating_sub(1);
        if ui
            .add(egui::Slider::new(&mut frame, 0..=last).text("frame"))
            .changed()
        {
            transport.seek(frame);
        }

        let mut rate = transport.rate();
        if ui
            .add(egui::Slider::new(&mut rate, MIN_RATE..=MAX_RATE).text("rate"))
            .changed()
        {
            transport.set_rate(rate);
        }

        ui.label(format!("{:.2}s", transport.current_time()));
    });

    transport.current_frame() != start
}
