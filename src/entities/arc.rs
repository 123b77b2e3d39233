//! Arc entity

use crate::types::Vector2;

/// An arc entity (portion of a circle)
///
/// Angles are stored in radians, measured counter-clockwise from the
/// positive X axis in drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// Center point of the arc
    pub center: Vector2,
    /// Radius of the arc
    pub radius: f64,
    /// Start angle in radians
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
}

impl Arc {
    /// Create a new arc
    pub fn new(center: Vector2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Create a new arc from coordinates, radius, and angles
    pub fn from_coords(x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc::new(Vector2::new(x, y), radius, start_angle, end_angle)
    }

    /// Get the sweep angle (angular extent) in radians, normalized to
    /// (0, 2*PI]. An end angle equal to the start angle reads as a full
    /// sweep.
    pub fn sweep_angle(&self) -> f64 {
        let mut sweep = self.end_angle - self.start_angle;
        if sweep <= 0.0 {
            sweep += 2.0 * std::f64::consts::PI;
        }
        sweep
    }

    /// Get the arc length
    pub fn arc_length(&self) -> f64 {
        self.radius * self.sweep_angle()
    }

    /// Get the start point of the arc
    pub fn start_point(&self) -> Vector2 {
        Vector2::new(
            self.center.x + self.radius * self.start_angle.cos(),
            self.center.y + self.radius * self.start_angle.sin(),
        )
    }

    /// Get the end point of the arc
    pub fn end_point(&self) -> Vector2 {
        Vector2::new(
            self.center.x + self.radius * self.end_angle.cos(),
            self.center.y + self.radius * self.end_angle.sin(),
        )
    }

    /// `true` when the sweep exceeds a half turn; this selects the
    /// large-arc flag of the SVG elliptical arc command.
    pub fn is_large_arc(&self) -> bool {
        self.sweep_angle() > std::f64::consts::PI
    }
}

impl Default for Arc {
    fn default() -> Self {
        Arc::new(Vector2::ZERO, 1.0, 0.0, std::f64::consts::PI / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_arc_sweep_angle() {
        let arc = Arc::from_coords(0.0, 0.0, 5.0, 0.0, PI);
        assert!((arc.sweep_angle() - PI).abs() < 1e-10);
    }

    #[test]
    fn test_arc_sweep_wraps_negative() {
        // 270 -> 90 degrees crosses zero: sweep is 180.
        let arc = Arc::from_coords(0.0, 0.0, 5.0, 1.5 * PI, 0.5 * PI);
        assert!((arc.sweep_angle() - PI).abs() < 1e-10);
    }

    #[test]
    fn test_arc_endpoints() {
        let arc = Arc::from_coords(0.0, 0.0, 5.0, 0.0, PI / 2.0);
        let start = arc.start_point();
        let end = arc.end_point();
        assert!((start.x - 5.0).abs() < 1e-10);
        assert!((start.y - 0.0).abs() < 1e-10);
        assert!((end.x - 0.0).abs() < 1e-10);
        assert!((end.y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_large_arc_selection() {
        let half = Arc::from_coords(0.0, 0.0, 1.0, 0.0, PI);
        assert!(!half.is_large_arc());

        let three_quarters = Arc::from_coords(0.0, 0.0, 1.0, 0.0, 1.5 * PI);
        assert!(three_quarters.is_large_arc());
    }
}
