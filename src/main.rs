// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! FRAMELINES - frame-by-frame line annotation for local videos.
//!
//! Usage: `framelines [MEDIA_FILE]`. Lines are saved per video and come
//! back the next time the same file is opened.

use anyhow::Result;
use framelines::app::FramelinesApp;
use framelines::config::Config;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = Config::load();
    let initial = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("FRAMELINES - Video Line Annotation"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "FRAMELINES",
        options,
        Box::new(|_cc| Ok(Box::new(FramelinesApp::new(config, initial)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
