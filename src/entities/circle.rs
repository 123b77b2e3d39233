//! Circle entity

use crate::types::Vector2;

/// A full circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center point
    pub center: Vector2,
    /// Radius
    pub radius: f64,
}

impl Circle {
    /// Create a new circle
    pub fn new(center: Vector2, radius: f64) -> Self {
        Circle { center, radius }
    }

    /// Create a circle from coordinates
    pub fn from_coords(x: f64, y: f64, radius: f64) -> Self {
        Circle::new(Vector2::new(x, y), radius)
    }

    /// Get the circumference
    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }
}

impl Default for Circle {
    fn default() -> Self {
        Circle::new(Vector2::ZERO, 1.0)
    }
}
