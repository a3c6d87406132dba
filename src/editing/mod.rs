// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Line editing core.
//!
//! Pointer positions are mapped into normalized video coordinates by
//! [`mapper`], matched against existing lines by [`hit_test`] and fed into
//! the [`state::DrawingState`] machine, which records undoable edits in
//! [`history`].

pub mod history;
pub mod keyboard;
pub mod mapper;
pub mod state;

pub use history::{HistoryAction, History};
pub use hit_test::{DragTarget, HitThresholds};
pub use mapper::{ContainerRect, VideoBounds};
pub use state::{DragSession, DrawingState, EditorSettings};
