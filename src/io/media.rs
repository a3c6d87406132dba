// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading (images and videos).
//!
//! This module opens media files as a sequence of RGBA frames. Still
//! images are a single frame; video decoding needs the `video-opencv`
//! feature.

use anyhow::{Context, Result};
use std::path::Path;

/// One decoded frame, RGBA8, row-major.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Random access to the frames of a media file.
pub trait FrameSource {
    /// Frame size in pixels.
    fn dimensions(&self) -> (u32, u32);

    fn frame_count(&self) -> usize;

    fn fps(&self) -> f64;

    /// Decode frame `index` (zero-based).
    fn frame(&mut self, index: usize) -> Result<Frame>;
}

/// A still image presented as a one-frame video.
pub struct StillImage {
    frame: Frame,
}

impl StillImage {
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Failed to decode image {}", path.display()))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            frame: Frame {
                width,
                height,
                pixels: image.into_raw(),
            },
        })
    }
}

impl FrameSource for StillImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }

    fn frame_count(&self) -> usize {
        1
    }

    fn fps(&self) -> f64 {
        1.0
    }

    fn frame(&mut self, _index: usize) -> Result<Frame> {
        Ok(self.frame.clone())
    }
}

#[cfg(feature = "video-opencv")]
pub use opencv_source::OpenCvVideo;

#[cfg(feature = "video-opencv")]
mod opencv_source {
    use super::{Frame, FrameSource};
    use anyhow::{Context, Result};
    use opencv::{core::Mat, imgproc, prelude::*, videoio};
    use std::path::Path;

    /// A video file decoded through OpenCV.
    pub struct OpenCvVideo {
        capture: videoio::VideoCapture,
        width: u32,
        height: u32,
        frame_count: usize,
        fps: f64,
    }

    impl OpenCvVideo {
        pub fn open(path: &Path) -> Result<Self> {
            let path_str = path.to_string_lossy();
            let capture = videoio::VideoCapture::from_file(&path_str, videoio::CAP_ANY)
                .with_context(|| format!("Failed to open video {}", path.display()))?;
            if !capture.is_opened()? {
                anyhow::bail!("Unsupported video {}", path.display());
            }
            let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
            let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
            let frame_count = capture.get(videoio::CAP_PROP_FRAME_COUNT)?.max(1.0) as usize;
            let fps = capture.get(videoio::CAP_PROP_FPS)?;
            Ok(Self {
                capture,
                width,
                height,
                frame_count,
                fps: if fps > 0.0 { fps } else { 30.0 },
            })
        }
    }

    impl FrameSource for OpenCvVideo {
        fn dimensions(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn frame_count(&self) -> usize {
            self.frame_count
        }

        fn fps(&self) -> f64 {
            self.fps
        }

        fn frame(&mut self, index: usize) -> Result<Frame> {
            self.capture.set(videoio::CAP_PROP_POS_FRAMES, index as f64)?;
            let mut bgr = Mat::default();
            if !self.capture.read(&mut bgr)? || bgr.empty() {
                anyhow::bail!("Failed to decode frame {}", index);
            }
            let mut rgba = Mat::default();
            imgproc::cvt_color(&bgr, &mut rgba, imgproc::COLOR_BGR2RGBA, 0)?;
            Ok(Frame {
                width: rgba.cols() as u32,
                height: rgba.rows() as u32,
                pixels: rgba.data_bytes()?.to_vec(),
            })
        }
    }
}

/// Open `path` with the best available decoder.
pub fn open_media(path: &Path) -> Result<Box<dyn FrameSource>> {
    if let Ok(still) = StillImage::open(path) {
        return Ok(Box::new(still));
    }

    #[cfg(feature = "video-opencv")]
    {
        return Ok(Box::new(OpenCvVideo::open(path)?));
    }

    #[cfg(not(feature = "video-opencv"))]
    anyhow::bail!(
        "{} is not an image; rebuild with the video-opencv feature to open videos",
        path.display()
    )
}
