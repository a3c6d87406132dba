// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides clamping into the normalized unit square,
//! pixel-space distance measurements, and conversions between pixel and
//! normalized coordinates.

use crate::models::annotation::Point;

/// Clamp each axis of `point` to [0, 1].
pub fn clamp_point(point: Point) -> Point {
    Point {
        x: point.x.clamp(0.0, 1.0),
        y: point.y.clamp(0.0, 1.0),
    }
}

/// Pixel distance between two normalized points on a `width` x `height` surface.
pub fn pixel_distance(a: Point, b: Point, width: f64, height: f64) -> f64 {
    let dx = (a.x - b.x) * width;
    let dy = (a.y - b.y) * height;
    (dx * dx + dy * dy).sqrt()
}

/// Pixel distance from `p` to the segment `[a, b]`.
///
/// All three points are scaled to pixels first. The projection parameter is
/// clamped to the segment, so points past an endpoint measure to that
/// endpoint. A zero-length segment uses a length-squared floor of 1.
pub fn distance_to_segment(p: Point, a: Point, b: Point, width: f64, height: f64) -> f64 {
    let (px, py) = (p.x * width, p.y * height);
    let (ax, ay) = (a.x * width, a.y * height);
    let (bx, by) = (b.x * width, b.y * height);

    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let len_sq = if len_sq == 0.0 { 1.0 } else { len_sq };

    let t = (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0);
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Convert pixel coordinates to normalized coordinates (0.0 to 1.0).
pub fn normalize_coordinates(pixel_x: f64, pixel_y: f64, width: f64, height: f64) -> Point {
    Point {
        x: pixel_x / width,
        y: pixel_y / height,
    }
}

/// Convert normalized coordinates to pixel coordinates.
pub fn denormalize_coordinates(point: &Point, width: f64, height: f64) -> (f64, f64) {
    (point.x * width, point.y * height)
}
