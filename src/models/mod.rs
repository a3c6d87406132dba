// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data models: lines, video identity, transport and export records.

pub mod annotation;
pub mod project;
pub mod transport;
pub mod video;
