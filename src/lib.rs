// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! FRAMELINES - frame-by-frame line annotation for local videos.
//!
//! Lines are stored in coordinates normalized to the visible video
//! rectangle and edited through the [`editing::DrawingState`] machine.
//! The [`session::Session`] connects that editor to per-video persistence.

pub mod app;
pub mod config;
pub mod editing;
pub mod io;
pub mod models;
pub mod session;
pub mod ui;
pub mod util;
