// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for video display and line annotation.
//!
//! This module shows the current frame aspect-fit in the available space,
//! turns pointer events into normalized [`PointerInput`]s and paints the
//! committed lines, the draft and the selection handles on top.

use crate::editing::mapper::{fit_video_bounds, map_pointer, ContainerRect, VideoBounds};
use crate::editing::DrawingState;
use crate::models::annotation::{Line, Point};
use crate::session::PointerInput;
use crate::util::geometry::denormalize_coordinates;

const LINE_COLOR: egui::Color32 = egui::Color32::YELLOW;
const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 120, 40);
const DRAFT_COLOR: egui::Color32 = egui::Color32::LIGHT_BLUE;
const HANDLE_RADIUS: f32 = 5.0;

/// Result of one canvas frame.
pub struct CanvasOutput {
    /// Where the video was drawn, relative to the canvas.
    pub bounds: Option<VideoBounds>,
    /// Pointer input for the editor, in event order.
    pub inputs: Vec<PointerInput>,
}

/// Display the canvas and collect pointer input.
pub fn show(
    ui: &mut egui::Ui,
    editor: &DrawingState,
    texture: Option<&egui::TextureHandle>,
    frame_size: Option<(u32, u32)>,
) -> CanvasOutput {
    let available = ui.available_size();
    let (rect, response) = ui.allocate_exact_size(available, egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(40));

    let container = ContainerRect {
        left: rect.min.x as f64,
        top: rect.min.y as f64,
        width: rect.width() as f64,
        height: rect.height() as f64,
    };
    let bounds = frame_size.and_then(|(w, h)| {
        fit_video_bounds(container.width, container.height, w as f64, h as f64)
    });

    let Some(video_bounds) = bounds else {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Pass a video or image path on the command line to begin annotating",
            egui::FontId::proportional(16.0),
            egui::Color32::from_gray(180),
        );
        return CanvasOutput {
            bounds: None,
            inputs: Vec::new(),
        };
    };

    let video_rect = egui::Rect::from_min_size(
        rect.min + egui::vec2(video_bounds.x as f32, video_bounds.y as f32),
        egui::vec2(video_bounds.width as f32, video_bounds.height as f32),
    );
    if let Some(texture) = texture {
        painter.image(
            texture.id(),
            video_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    let inputs = collect_inputs(ui, &response, &container, &video_bounds);

    for line in editor.lines() {
        let selected = editor.selected_id() == Some(line.id.as_str());
        let color = if selected { SELECTED_COLOR } else { LINE_COLOR };
        draw_line(&painter, line, &video_rect, color, selected);
    }
    if let Some(draft) = editor.draft() {
        draw_line(&painter, draft, &video_rect, DRAFT_COLOR, true);
    }

    CanvasOutput {
        bounds: Some(video_bounds),
        inputs,
    }
}

fn collect_inputs(
    ui: &egui::Ui,
    response: &egui::Response,
    container: &ContainerRect,
    bounds: &VideoBounds,
) -> Vec<PointerInput> {
    let map = |pos: Option<egui::Pos2>| {
        pos.and_then(|p| map_pointer(p.x as f64, p.y as f64, container, Some(bounds)))
    };

    ui.input(|i| {
        let mut inputs = Vec::new();
        let pos = i.pointer.interact_pos();
        if response.hovered() {
            if i.pointer.primary_pressed() {
                inputs.push(PointerInput::Down {
                    point: map(pos),
                    secondary: false,
                });
            } else if i.pointer.secondary_pressed() {
                inputs.push(PointerInput::Down {
                    point: map(pos),
                    secondary: true,
                });
            }
        }
        if i.pointer.is_moving() {
            inputs.push(PointerInput::Move(map(i.pointer.latest_pos())));
        }
        if i.pointer.primary_released() {
            inputs.push(PointerInput::Up);
        }
        inputs
    })
}

/// Draw a line with its endpoint handles.
fn draw_line(
    painter: &egui::Painter,
    line: &Line,
    video_rect: &egui::Rect,
    color: egui::Color32,
    show_handles: bool,
) {
    let to_screen = |p: &Point| {
        let (x, y) = denormalize_coordinates(p, video_rect.width() as f64, video_rect.height() as f64);
        video_rect.min + egui::vec2(x as f32, y as f32)
    };
    let (a, b) = (to_screen(&line.p1), to_screen(&line.p2));

    painter.line_segment([a, b], egui::Stroke::new(2.0, color));

    if show_handles {
        for point in [a, b] {
            painter.circle_filled(point, HANDLE_RADIUS, egui::Color32::WHITE);
            painter.circle_stroke(point, HANDLE_RADIUS, egui::Stroke::new(1.0, egui::Color32::BLACK));
        }
    }
}
