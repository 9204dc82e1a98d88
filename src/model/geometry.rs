//! Plain 2D geometry for the controller's viewport and touch positions.

use serde::Serialize;

/// A position in the host's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The visible window of the paged container.
///
/// Expressed in the same coordinate space as incoming touch samples, so
/// hit-testing a sample against the viewport needs no transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Horizontal size.
    pub width: f64,
    /// Vertical size.
    pub height: f64,
}

impl Viewport {
    /// Viewport with its top-left corner at (`left`, `top`).
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Viewport anchored at the origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Whether `point` falls inside the viewport, edges included.
    pub fn contains(&self, point: Point) -> bool {
        let local_x = point.x - self.left;
        let local_y = point.y - self.top;
        local_x >= 0.0 && local_x <= self.width && local_y >= 0.0 && local_y <= self.height
    }

    /// True when both sizes are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Copy with negative or non-finite sizes replaced by zero.
    pub fn sanitized(&self) -> Self {
        let fix = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            left: self.left,
            top: self.top,
            width: fix(self.width),
            height: fix(self.height),
        }
    }
}
