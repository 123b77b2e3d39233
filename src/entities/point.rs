//! Point entity

use crate::types::Vector2;

/// A point marker entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Location of the point
    pub location: Vector2,
}

impl Point {
    /// Create a new point
    pub fn new(location: Vector2) -> Self {
        Point { location }
    }

    /// Create a point from coordinates
    pub fn from_coords(x: f64, y: f64) -> Self {
        Point::new(Vector2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let p = Point::from_coords(3.0, -1.0);
        assert_eq!(p.location, Vector2::new(3.0, -1.0));
    }
}
