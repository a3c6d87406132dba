// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! History system for undo/redo functionality.
//!
//! History records actions rather than whole snapshots of the line list.
//! Each action carries full copies of the lines it touched, so applying
//! it forward or in reverse never depends on the state it came from.

use std::collections::VecDeque;

use crate::models::annotation::Line;

/// Default number of actions kept on each stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One undoable edit.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    Add(Line),
    Delete(Line),
    /// Snapshots of the same line before and after an edit.
    Update { before: Line, after: Line },
}

/// Undo the effect of `action` on `lines`.
pub fn apply_inverse(mut lines: Vec<Line>, action: &HistoryAction) -> Vec<Line> {
    match action {
        HistoryAction::Add(line) => lines.retain(|l| l.id != line.id),
        HistoryAction::Delete(line) => insert_unique(&mut lines, line),
        HistoryAction::Update { before, after } => replace(&mut lines, &after.id, before),
    }
    lines
}

/// Re-apply the effect of `action` on `lines`.
pub fn apply_forward(mut lines: Vec<Line>, action: &HistoryAction) -> Vec<Line> {
    match action {
        HistoryAction::Add(line) => insert_unique(&mut lines, line),
        HistoryAction::Delete(line) => lines.retain(|l| l.id != line.id),
        HistoryAction::Update { before, after } => replace(&mut lines, &before.id, after),
    }
    lines
}

/// Append `line` unless its id is already present.
fn insert_unique(lines: &mut Vec<Line>, line: &Line) {
    if lines.iter().all(|l| l.id != line.id) {
        lines.push(line.clone());
    }
}

fn replace(lines: &mut [Line], id: &str, with: &Line) {
    if let Some(slot) = lines.iter_mut().find(|l| l.id == id) {
        *slot = with.clone();
    }
}

/// A stack that drops its oldest entry when pushed past `limit`.
#[derive(Debug, Clone)]
struct BoundedStack {
    entries: VecDeque<HistoryAction>,
    limit: usize,
}

impl BoundedStack {
    fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    fn push(&mut self, action: HistoryAction) {
        self.entries.push_back(action);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    fn pop(&mut self) -> Option<HistoryAction> {
        self.entries.pop_back()
    }
}

/// Undo and redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: BoundedStack,
    redo_stack: BoundedStack,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// A limit of zero is raised to one.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            undo_stack: BoundedStack::new(limit),
            redo_stack: BoundedStack::new(limit),
        }
    }

    /// Record a new edit. Clears the redo stack.
    pub fn push(&mut self, action: HistoryAction) {
        self.undo_stack.push(action);
        self.redo_stack.entries.clear();
    }

    /// Revert the latest edit on `lines` and move it to the redo stack.
    /// Returns false if there is nothing to undo.
    pub fn undo(&mut self, lines: &mut Vec<Line>) -> bool {
        let Some(action) = self.undo_stack.pop() else {
            return false;
        };
        *lines = apply_inverse(std::mem::take(lines), &action);
        self.redo_stack.push(action);
        true
    }

    /// Re-apply the latest undone edit on `lines` and move it back to the
    /// undo stack. Returns false if there is nothing to redo.
    pub fn redo(&mut self, lines: &mut Vec<Line>) -> bool {
        let Some(action) = self.redo_stack.pop() else {
            return false;
        };
        *lines = apply_forward(std::mem::take(lines), &action);
        self.undo_stack.push(action);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.entries.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.entries.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.entries.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.entries.len()
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &HistoryAction> {
        self.undo_stack.entries.iter()
    }

    /// Redo entries, oldest first.
    pub fn redo_entries(&self) -> impl Iterator<Item = &HistoryAction> {
        self.redo_stack.entries.iter()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.entries.clear();
        self.redo_stack.entries.clear();
    }
}
