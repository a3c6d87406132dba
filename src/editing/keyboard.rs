// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Keyboard shortcut handling for the editor.

use super::state::DrawingState;

/// Keys the editor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Delete,
    Backspace,
    Other,
}

/// Delete the selected line if `key` is Delete or Backspace and no text
/// field has keyboard focus. Returns true if the shortcut fired.
pub fn handle_key(state: &mut DrawingState, key: EditorKey, text_input_focused: bool) -> bool {
    if text_input_focused {
        return false;
    }
    match key {
        EditorKey::Delete | EditorKey::Backspace => {
            let before = state.revision();
            state.delete_selected();
            state.revision() != before
        }
        EditorKey::Other => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::mapper::VideoBounds;
    use crate::models::annotation::Point;

    fn with_selected_line() -> DrawingState {
        let mut state = DrawingState::default();
        state.set_bounds(Some(VideoBounds {
            x: 0.0,
            y: 0.0,
            width: 640.0,
            height: 480.0,
        }));
        state.pointer_down(Some(Point::new(0.1, 0.1)), false);
        state.pointer_move(Some(Point::new(0.9, 0.9)));
        state.pointer_up();
        state
    }

    #[test]
    fn test_delete_and_backspace_remove_selection() {
        for key in [EditorKey::Delete, EditorKey::Backspace] {
            let mut state = with_selected_line();
            assert!(handle_key(&mut state, key, false));
            assert!(state.lines().is_empty());
        }
    }

    #[test]
    fn test_text_focus_suppresses_delete() {
        let mut state = with_selected_line();
        assert!(!handle_key(&mut state, EditorKey::Delete, true));
        assert_eq!(state.lines().len(), 1);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let mut state = with_selected_line();
        assert!(!handle_key(&mut state, EditorKey::Other, false));
        assert_eq!(state.lines().len(), 1);
    }
}
