//! Spline entity

use crate::types::Vector2;
use bitflags::bitflags;

bitflags! {
    /// Group-70 spline flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SplineFlags: u32 {
        /// The spline is closed
        const CLOSED = 1;
        /// The spline is periodic
        const PERIODIC = 2;
        /// The spline is rational
        const RATIONAL = 4;
    }
}

/// A spline entity
///
/// The preview does not evaluate the B-spline basis; the renderer draws
/// a polyline through the control points, which is adequate at preview
/// scale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spline {
    /// Degree of the spline curve
    pub degree: u32,
    /// Control points
    pub control_points: Vec<Vector2>,
    /// Group-70 flags
    pub flags: SplineFlags,
}

impl Spline {
    /// Create a new empty spline
    pub fn new() -> Self {
        Spline {
            degree: 3,
            ..Spline::default()
        }
    }

    /// Add a control point
    pub fn add_control_point(&mut self, point: Vector2) {
        self.control_points.push(point);
    }

    /// Is the spline closed?
    pub fn is_closed(&self) -> bool {
        self.flags.contains(SplineFlags::CLOSED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spline_build() {
        let mut s = Spline::new();
        s.add_control_point(Vector2::new(0.0, 0.0));
        s.add_control_point(Vector2::new(2.0, 3.0));
        assert_eq!(s.degree, 3);
        assert_eq!(s.control_points.len(), 2);
        assert!(!s.is_closed());
    }

    #[test]
    fn test_spline_flags() {
        let mut s = Spline::new();
        s.flags = SplineFlags::from_bits_truncate(3);
        assert!(s.is_closed());
        assert!(s.flags.contains(SplineFlags::PERIODIC));
    }
}
