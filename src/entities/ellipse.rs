//! Ellipse entity

use crate::types::Vector2;

/// An ellipse entity
///
/// The major axis is stored as a vector from the center to the major
/// axis endpoint, exactly as DXF encodes it (codes 11/21).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// Center point
    pub center: Vector2,
    /// Endpoint of the major axis, relative to the center
    pub major_axis: Vector2,
    /// Ratio of minor axis to major axis length
    pub ratio: f64,
}

impl Ellipse {
    /// Create a new ellipse
    pub fn new(center: Vector2, major_axis: Vector2, ratio: f64) -> Self {
        Ellipse {
            center,
            major_axis,
            ratio,
        }
    }

    /// Semi-major axis length
    pub fn major_length(&self) -> f64 {
        self.major_axis.length()
    }

    /// Semi-minor axis length
    pub fn minor_length(&self) -> f64 {
        self.major_length() * self.ratio
    }

    /// Rotation of the major axis, counter-clockwise degrees from the
    /// positive X axis
    pub fn rotation_degrees(&self) -> f64 {
        self.major_axis.y.atan2(self.major_axis.x).to_degrees()
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Ellipse::new(Vector2::ZERO, Vector2::UNIT_X, 1.0)
    }
}
