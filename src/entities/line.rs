//! Line entity

use crate::types::Vector2;

/// A straight line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point
    pub start: Vector2,
    /// End point
    pub end: Vector2,
}

impl Line {
    /// Create a new line between two points
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Line { start, end }
    }

    /// Create a line from coordinates
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Line::new(Vector2::new(x1, y1), Vector2::new(x2, y2))
    }

    /// Get the length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Get the midpoint of the line
    pub fn midpoint(&self) -> Vector2 {
        (self.start + self.end) / 2.0
    }
}

impl Default for Line {
    fn default() -> Self {
        Line::new(Vector2::ZERO, Vector2::UNIT_X)
    }
}
