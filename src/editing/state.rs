// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing state machine.
//!
//! Owns the committed lines, the draft being drawn, the selection, the
//! active drag session and the undo/redo history. The state is one of
//! Idle, Drafting (a draft exists) or Dragging (a drag session exists);
//! a draft and a drag session never coexist.
//!
//! Every operation is total. Input that makes no sense in the current
//! state is ignored.

use super::hit_test::{hit_test, DragTarget, HitThresholds};
use super::history::{History, HistoryAction};
use super::mapper::VideoBounds;
use crate::models::annotation::{Line, Point};
use crate::util::geometry::clamp_point;

/// A line being moved or reshaped by one pointer gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub id: String,
    /// The line as it was when the gesture started.
    pub before: Line,
    pub last_pointer: Point,
    pub target: DragTarget,
}

/// Tunables for the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    pub thresholds: HitThresholds,
    pub history_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            thresholds: HitThresholds::default(),
            history_limit: super::history::DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DrawingState {
    lines: Vec<Line>,
    draft: Option<Line>,
    selected: Option<String>,
    drag: Option<DragSession>,
    history: History,
    thresholds: HitThresholds,
    /// Video rectangle used for pixel-space hit thresholds.
    bounds: Option<VideoBounds>,
    /// Bumped on every change to the committed line list.
    revision: u64,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl DrawingState {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            lines: Vec::new(),
            draft: None,
            selected: None,
            drag: None,
            history: History::new(settings.history_limit),
            thresholds: settings.thresholds,
            bounds: None,
            revision: 0,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn draft(&self) -> Option<&Line> {
        self.draft.as_ref()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn bounds(&self) -> Option<&VideoBounds> {
        self.bounds.as_ref()
    }

    /// Update the video rectangle after a load or resize.
    pub fn set_bounds(&mut self, bounds: Option<VideoBounds>) {
        self.bounds = bounds;
    }

    pub fn is_drafting(&self) -> bool {
        self.draft.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_down(&mut self, point: Option<Point>, secondary: bool) {
        if secondary {
            return;
        }

        let Some(point) = point.map(clamp_point) else {
            // Pressing outside the video deselects.
            self.selected = None;
            self.drag = None;
            return;
        };

        let hit = hit_test(point, &self.lines, self.bounds.as_ref(), &self.thresholds)
            .map(|hit| (hit.line.clone(), hit.target));

        if let Some((line, target)) = hit {
            log::debug!("Grabbed line {} ({:?})", line.id, target);
            self.selected = Some(line.id.clone());
            self.draft = None;
            self.drag = Some(DragSession {
                id: line.id.clone(),
                before: line,
                last_pointer: point,
                target,
            });
            return;
        }

        if self.selected.is_some() {
            // First press on empty video only clears the selection.
            self.selected = None;
            self.drag = None;
            return;
        }

        self.drag = None;
        self.draft = Some(Line::start_at(point));
    }

    pub fn pointer_move(&mut self, point: Option<Point>) {
        let Some(point) = point.map(clamp_point) else {
            return;
        };

        if let Some(draft) = self.draft.as_mut() {
            draft.p2 = point;
            return;
        }

        let Some(session) = self.drag.as_mut() else {
            return;
        };
        let Some(line) = self.lines.iter_mut().find(|l| l.id == session.id) else {
            // The line vanished under the gesture.
            self.drag = None;
            return;
        };

        match session.target {
            DragTarget::Move => {
                let dx = point.x - session.last_pointer.x;
                let dy = point.y - session.last_pointer.y;
                line.p1 = clamp_point(Point::new(line.p1.x + dx, line.p1.y + dy));
                line.p2 = clamp_point(Point::new(line.p2.x + dx, line.p2.y + dy));
            }
            DragTarget::P1 => line.p1 = point,
            DragTarget::P2 => line.p2 = point,
        }
        session.last_pointer = point;
    }

    pub fn pointer_up(&mut self) {
        if let Some(draft) = self.draft.take() {
            log::info!("Added line {}, total: {}", draft.id, self.lines.len() + 1);
            self.selected = Some(draft.id.clone());
            self.lines.push(draft.clone());
            self.history.push(HistoryAction::Add(draft));
            self.revision += 1;
            return;
        }

        let Some(session) = self.drag.take() else {
            return;
        };
        let Some(after) = self.lines.iter().find(|l| l.id == session.id) else {
            return;
        };
        if after.geometry_differs(&session.before) {
            log::info!("Updated line {}", after.id);
            self.history.push(HistoryAction::Update {
                before: session.before,
                after: after.clone(),
            });
            self.revision += 1;
        }
    }

    pub fn undo(&mut self) {
        if self.history.undo(&mut self.lines) {
            self.after_history_step();
            log::info!("Undo, total: {}", self.lines.len());
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo(&mut self.lines) {
            self.after_history_step();
            log::info!("Redo, total: {}", self.lines.len());
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected.as_deref() else {
            return;
        };
        let Some(index) = self.lines.iter().position(|l| l.id == id) else {
            return;
        };

        let removed = self.lines.remove(index);
        if self.drag.as_ref().is_some_and(|s| s.id == removed.id) {
            self.drag = None;
        }
        self.selected = None;
        log::info!("Deleted line {}, total: {}", removed.id, self.lines.len());
        self.history.push(HistoryAction::Delete(removed));
        self.revision += 1;
    }

    /// Replace all lines and forget every edit. Used when switching videos
    /// or when persisted lines arrive.
    pub fn reset(&mut self, new_lines: Vec<Line>) {
        let mut lines: Vec<Line> = Vec::with_capacity(new_lines.len());
        for line in new_lines {
            if lines.iter().any(|l| l.id == line.id) {
                log::warn!("Dropping duplicate line id {}", line.id);
                continue;
            }
            lines.push(line.clamped());
        }

        self.lines = lines;
        self.draft = None;
        self.selected = None;
        self.drag = None;
        self.history.clear();
        self.revision += 1;
    }

    /// Drop the draft, selection and drag session, keeping lines and history.
    pub fn clear_interaction(&mut self) {
        self.draft = None;
        self.selected = None;
        self.drag = None;
    }

    /// Keep selection and drag session pointing at lines that still exist.
    fn after_history_step(&mut self) {
        if let Some(id) = self.selected.as_deref() {
            if !self.contains(id) {
                self.selected = None;
            }
        }
        if let Some(session) = self.drag.as_ref() {
            if !self.contains(&session.id) {
                self.drag = None;
            }
        }
        self.revision += 1;
    }

    fn contains(&self, id: &str) -> bool {
        self.lines.iter().any(|l| l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> DrawingState {
        let mut state = DrawingState::default();
        state.set_bounds(Some(VideoBounds {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 1000.0,
        }));
        state
    }

    /// Deselect, then draw one line. Returns the new line's id.
    fn draw(state: &mut DrawingState, from: (f64, f64), to: (f64, f64)) -> String {
        state.pointer_down(None, false);
        state.pointer_up();
        state.pointer_down(Some(Point::new(from.0, from.1)), false);
        state.pointer_move(Some(Point::new(to.0, to.1)));
        state.pointer_up();
        state.selected_id().unwrap().to_string()
    }

    #[test]
    fn test_draw_commits_line() {
        let mut state = editor();
        state.pointer_down(Some(Point::new(0.2, 0.2)), false);
        let draft = state.draft().unwrap();
        assert_eq!(draft.p1, Point::new(0.2, 0.2));
        assert_eq!(draft.p2, Point::new(0.2, 0.2));

        state.pointer_move(Some(Point::new(0.5, 0.5)));
        assert_eq!(state.draft().unwrap().p2, Point::new(0.5, 0.5));

        state.pointer_up();
        assert!(state.draft().is_none());
        assert_eq!(state.lines().len(), 1);
        let line = &state.lines()[0];
        assert_eq!(line.p1, Point::new(0.2, 0.2));
        assert_eq!(line.p2, Point::new(0.5, 0.5));
        assert_eq!(state.selected_id(), Some(line.id.as_str()));
        assert_eq!(state.history().undo_len(), 1);
        assert!(matches!(
            state.history().undo_entries().next(),
            Some(HistoryAction::Add(added)) if added == line
        ));
    }

    #[test]
    fn test_draft_freezes_when_pointer_leaves_video() {
        let mut state = editor();
        state.pointer_down(Some(Point::new(0.2, 0.2)), false);
        state.pointer_move(Some(Point::new(0.4, 0.4)));
        state.pointer_move(None);
        assert_eq!(state.draft().unwrap().p2, Point::new(0.4, 0.4));
    }

    #[test]
    fn test_drag_handle_records_update() {
        let mut state = editor();
        let id = draw(&mut state, (0.2, 0.2), (0.5, 0.5));

        state.pointer_down(Some(Point::new(0.2, 0.2)), false);
        assert!(state.draft().is_none());
        let session = state.drag_session().unwrap();
        assert_eq!(session.target, DragTarget::P1);
        assert_eq!(session.id, id);

        state.pointer_move(Some(Point::new(0.1, 0.3)));
        state.pointer_up();
        assert!(state.drag_session().is_none());
        assert_eq!(state.history().undo_len(), 2);

        match state.history().undo_entries().last() {
            Some(HistoryAction::Update { before, after }) => {
                assert_eq!(before.p1, Point::new(0.2, 0.2));
                assert_eq!(after.p1, Point::new(0.1, 0.3));
                assert_eq!(before.p2, after.p2);
                assert_eq!(before.id, after.id);
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_tap_on_handle_records_nothing() {
        let mut state = editor();
        draw(&mut state, (0.2, 0.2), (0.5, 0.5));
        let revision = state.revision();

        state.pointer_down(Some(Point::new(0.5, 0.5)), false);
        state.pointer_up();
        assert_eq!(state.history().undo_len(), 1);
        assert_eq!(state.revision(), revision);
    }

    #[test]
    fn test_drag_back_to_start_records_nothing() {
        let mut state = editor();
        draw(&mut state, (0.25, 0.25), (0.5, 0.5));

        state.pointer_down(Some(Point::new(0.375, 0.375)), false);
        assert_eq!(state.drag_session().unwrap().target, DragTarget::Move);
        state.pointer_move(Some(Point::new(0.5, 0.375)));
        assert_eq!(state.lines()[0].p1, Point::new(0.375, 0.25));
        state.pointer_move(Some(Point::new(0.375, 0.375)));
        state.pointer_up();
        assert_eq!(state.history().undo_len(), 1);
    }

    #[test]
    fn test_move_drag_is_incremental_and_clamped() {
        let mut state = editor();
        draw(&mut state, (0.2, 0.5), (0.6, 0.5));

        state.pointer_down(Some(Point::new(0.4, 0.5)), false);
        // Push left past the edge: p1 stops at 0 while p2 keeps moving.
        state.pointer_move(Some(Point::new(0.1, 0.5)));
        let line = &state.lines()[0];
        assert_eq!(line.p1.x, 0.0);
        assert!((line.p2.x - 0.3).abs() < 1e-9);

        // Deltas are relative to the last pointer, not the gesture start.
        state.pointer_move(Some(Point::new(0.2, 0.5)));
        let line = &state.lines()[0];
        assert!((line.p1.x - 0.1).abs() < 1e-9);
        assert!((line.p2.x - 0.4).abs() < 1e-9);
        state.pointer_up();
        assert_eq!(state.history().undo_len(), 2);
    }

    #[test]
    fn test_undo_redo_add() {
        let mut state = editor();
        draw(&mut state, (0.2, 0.2), (0.5, 0.5));
        let line = state.lines()[0].clone();

        state.undo();
        assert!(state.lines().is_empty());
        assert_eq!(state.history().undo_len(), 0);
        assert_eq!(state.history().redo_len(), 1);
        assert!(state.selected_id().is_none());

        state.redo();
        assert_eq!(state.lines(), &[line]);
        assert_eq!(state.history().undo_len(), 1);
        assert_eq!(state.history().redo_len(), 0);
    }

    #[test]
    fn test_undo_redo_round_trip_over_mixed_edits() {
        let mut state = editor();
        draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        draw(&mut state, (0.1, 0.5), (0.3, 0.5));

        state.pointer_down(Some(Point::new(0.3, 0.5)), false);
        state.pointer_move(Some(Point::new(0.6, 0.7)));
        state.pointer_up();
        state.delete_selected();

        for _ in 0..3 {
            let before = state.lines().to_vec();
            state.undo();
            state.redo();
            assert_eq!(state.lines(), before.as_slice());
            state.undo();
        }
        assert_eq!(state.history().undo_len(), 1);
        assert_eq!(state.history().redo_len(), 3);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut state = editor();
        draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        state.undo();
        assert!(state.can_redo());
        draw(&mut state, (0.1, 0.5), (0.3, 0.5));
        assert!(!state.can_redo());
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut state = editor();
        let id = draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        // Press on empty video to deselect.
        state.pointer_down(Some(Point::new(0.8, 0.8)), false);
        state.pointer_up();
        assert!(state.selected_id().is_none());

        let lines = state.lines().to_vec();
        let revision = state.revision();
        state.delete_selected();
        assert_eq!(state.lines(), lines.as_slice());
        assert_eq!(state.history().undo_len(), 1);
        assert!(state.selected_id().is_none());
        assert_eq!(state.revision(), revision);
        assert_eq!(state.lines()[0].id, id);
    }

    #[test]
    fn test_delete_selected_records_delete() {
        let mut state = editor();
        draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        let line = state.lines()[0].clone();
        state.delete_selected();
        assert!(state.lines().is_empty());
        assert!(state.selected_id().is_none());
        assert!(matches!(
            state.history().undo_entries().last(),
            Some(HistoryAction::Delete(deleted)) if *deleted == line
        ));

        state.undo();
        assert_eq!(state.lines(), &[line]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = editor();
        draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        draw(&mut state, (0.1, 0.5), (0.3, 0.5));
        state.undo();

        // Reset mid-drag.
        state.pointer_down(Some(Point::new(0.1, 0.1)), false);
        assert!(state.is_dragging());
        state.reset(Vec::new());

        assert!(state.lines().is_empty());
        assert!(state.draft().is_none());
        assert!(state.drag_session().is_none());
        assert!(state.selected_id().is_none());
        assert!(!state.can_undo());
        assert!(!state.can_redo());

        // Reset mid-draft.
        state.pointer_down(Some(Point::new(0.1, 0.1)), false);
        assert!(state.is_drafting());
        state.reset(Vec::new());
        assert!(state.draft().is_none());
    }

    #[test]
    fn test_reset_drops_duplicates_and_clamps() {
        let mut state = editor();
        let line = Line {
            id: "a".to_string(),
            p1: Point::new(-0.2, 0.5),
            p2: Point::new(0.5, 1.5),
            created_at: 1,
        };
        state.reset(vec![line.clone(), line]);
        assert_eq!(state.lines().len(), 1);
        assert_eq!(state.lines()[0].p1, Point::new(0.0, 0.5));
        assert_eq!(state.lines()[0].p2, Point::new(0.5, 1.0));
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut state = editor();
        state.pointer_down(Some(Point::new(0.2, 0.2)), true);
        assert!(!state.is_drafting());
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_press_outside_video_deselects() {
        let mut state = editor();
        draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        state.pointer_down(None, false);
        assert!(state.selected_id().is_none());
        assert!(!state.is_drafting());
    }

    #[test]
    fn test_press_on_empty_video_with_selection_only_deselects() {
        let mut state = editor();
        draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        state.pointer_down(Some(Point::new(0.7, 0.7)), false);
        assert!(state.selected_id().is_none());
        assert!(!state.is_drafting());

        state.pointer_down(Some(Point::new(0.7, 0.7)), false);
        assert!(state.is_drafting());
    }

    #[test]
    fn test_draft_and_drag_never_coexist() {
        let mut state = editor();
        draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        state.pointer_down(None, false);
        state.pointer_down(Some(Point::new(0.6, 0.6)), false);
        assert!(state.is_drafting() && !state.is_dragging());
        state.pointer_up();
        state.pointer_down(Some(Point::new(0.1, 0.1)), false);
        assert!(state.is_dragging() && !state.is_drafting());
    }

    #[test]
    fn test_clear_interaction_keeps_lines_and_history() {
        let mut state = editor();
        draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        state.clear_interaction();
        assert!(state.selected_id().is_none());
        assert_eq!(state.lines().len(), 1);
        assert!(state.can_undo());
    }

    #[test]
    fn test_without_bounds_nothing_is_hit() {
        let mut state = editor();
        draw(&mut state, (0.1, 0.1), (0.3, 0.1));
        state.pointer_down(None, false);
        state.set_bounds(None);
        state.pointer_down(Some(Point::new(0.1, 0.1)), false);
        assert!(!state.is_dragging());
        assert!(state.is_drafting());
    }

    #[test]
    fn test_history_cap_holds_through_state() {
        let mut state = DrawingState::new(EditorSettings {
            history_limit: 5,
            ..EditorSettings::default()
        });
        state.set_bounds(Some(VideoBounds {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 1000.0,
        }));
        for i in 0..8 {
            let y = 0.1 * (i as f64 + 1.0);
            draw(&mut state, (0.1, y), (0.2, y));
            state.pointer_down(None, false);
        }
        assert_eq!(state.lines().len(), 8);
        assert_eq!(state.history().undo_len(), 5);
        for _ in 0..8 {
            state.undo();
        }
        assert_eq!(state.lines().len(), 3);
        assert_eq!(state.history().redo_len(), 5);
    }
}
