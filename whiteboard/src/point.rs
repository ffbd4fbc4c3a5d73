//! Surface-local points and the viewport that produces them.

#[cfg(test)]
#[path = "point_test.rs"]
mod point_test;

use serde::{Deserialize, Serialize};

/// A point in surface-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point { x: (self.x + other.x) / 2.0, y: (self.y + other.y) / 2.0 }
    }
}

/// Placement of the drawing surface in client (page) coordinates.
///
/// `left` / `top` are the bounding-box origin reported by the host.
/// `width` / `height` are in CSS pixels; zero means "not measured yet".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a client-space point to surface-local coordinates.
    ///
    /// The result is clamped into `[0, width] x [0, height]` once the surface
    /// has been measured, so captured pointers dragged past the edge stay on
    /// the board.
    #[must_use]
    pub fn to_surface(&self, client: Point) -> Point {
        let x = client.x - self.left;
        let y = client.y - self.top;
        if self.width <= 0.0 || self.height <= 0.0 {
            return Point { x, y };
        }
        Point { x: x.clamp(0.0, self.width), y: y.clamp(0.0, self.height) }
    }
}
