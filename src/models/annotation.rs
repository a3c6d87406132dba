// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! Lines are the only annotation shape. Their endpoints are stored in
//! coordinates normalized to the visible video rectangle, so they stay
//! anchored to the same content regardless of window size.

use serde::{Deserialize, Serialize};

use crate::util::geometry::clamp_point;

/// A 2D point with normalized coordinates (0.0 to 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A committed (or draft) straight-line annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: String,
    pub p1: Point,
    pub p2: Point,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Line {
    /// Create a zero-length line at `point` with a fresh id and the
    /// current timestamp. Used to seed a draft.
    pub fn start_at(point: Point) -> Self {
        let point = clamp_point(point);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            p1: point,
            p2: point,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Clamp both endpoints into the unit square.
    pub fn clamped(mut self) -> Self {
        self.p1 = clamp_point(self.p1);
        self.p2 = clamp_point(self.p2);
        self
    }

    /// True if the endpoints differ from `other` on any coordinate.
    pub fn geometry_differs(&self, other: &Line) -> bool {
        self.p1 != other.p1 || self.p2 != other.p2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_at_is_zero_length() {
        let line = Line::start_at(Point::new(0.2, 0.3));
        assert_eq!(line.p1, line.p2);
        assert_eq!(line.p1, Point::new(0.2, 0.3));
        assert!(!line.id.is_empty());
    }

    #[test]
    fn test_start_at_ids_are_unique() {
        let a = Line::start_at(Point::new(0.1, 0.1));
        let b = Line::start_at(Point::new(0.1, 0.1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_start_at_clamps() {
        let line = Line::start_at(Point::new(-0.5, 1.5));
        assert_eq!(line.p1, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_serializes_created_at_in_camel_case() {
        let line = Line {
            id: "a".to_string(),
            p1: Point::new(0.0, 0.5),
            p2: Point::new(1.0, 0.5),
            created_at: 42,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"createdAt\":42"));
        let back: Line = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn test_geometry_differs() {
        let a = Line::start_at(Point::new(0.1, 0.1));
        let mut b = a.clone();
        assert!(!a.geometry_differs(&b));
        b.p2.y = 0.2;
        assert!(a.geometry_differs(&b));
    }
}
