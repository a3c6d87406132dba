// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer to normalized coordinate mapping.
//!
//! The video is drawn aspect-fit inside its container, so part of the
//! container may be letterbox or pillarbox padding. Only pointer positions
//! inside the visible video rectangle map to a point.

use crate::models::annotation::Point;
use crate::util::geometry::clamp_point;

/// Visible video rectangle in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl VideoBounds {
    fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// True if the container-local position lies inside (edges included).
    pub fn contains(&self, local_x: f64, local_y: f64) -> bool {
        local_x >= self.x
            && local_x <= self.x + self.width
            && local_y >= self.y
            && local_y <= self.y + self.height
    }
}

/// Container position in viewport pixels. Only the origin matters for mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Compute the centered aspect-fit rectangle of a `video_width` x
/// `video_height` frame inside a container of the given size.
pub fn fit_video_bounds(
    container_width: f64,
    container_height: f64,
    video_width: f64,
    video_height: f64,
) -> Option<VideoBounds> {
    if container_width <= 0.0 || container_height <= 0.0 || video_width <= 0.0 || video_height <= 0.0 {
        return None;
    }

    let video_aspect = video_width / video_height;
    let container_aspect = container_width / container_height;

    let (width, height) = if video_aspect > container_aspect {
        // Video is wider - fit to width
        (container_width, container_width / video_aspect)
    } else {
        // Video is taller - fit to height
        (container_height * video_aspect, container_height)
    };

    Some(VideoBounds {
        x: (container_width - width) / 2.0,
        y: (container_height - height) / 2.0,
        width,
        height,
    })
}

/// Map a viewport pointer position to a normalized point on the video.
///
/// Returns `None` when no bounds are known or the pointer is outside the
/// visible video rectangle.
pub fn map_pointer(
    client_x: f64,
    client_y: f64,
    container: &ContainerRect,
    bounds: Option<&VideoBounds>,
) -> Option<Point> {
    let bounds = bounds.filter(|b| b.is_usable())?;
    let local_x = client_x - container.left;
    let local_y = client_y - container.top;
    if !bounds.contains(local_x, local_y) {
        return None;
    }
    Some(clamp_point(Point::new(
        (local_x - bounds.x) / bounds.width,
        (local_y - bounds.y) / bounds.height,
    )))
}
