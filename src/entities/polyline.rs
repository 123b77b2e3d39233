//! Polyline entity (covers LWPOLYLINE and legacy POLYLINE/VERTEX chains)

use crate::types::Vector2;
use bitflags::bitflags;

bitflags! {
    /// Group-70 polyline flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PolylineFlags: u32 {
        /// The polyline is closed
        const CLOSED = 1;
        /// Curve-fit vertices have been added
        const CURVE_FIT = 2;
        /// Spline-fit vertices have been added
        const SPLINE_FIT = 4;
    }
}

/// A 2D polyline
///
/// Bulge values are not kept; arc segments render as straight chords
/// in the preview.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    /// Vertices in order
    pub vertices: Vec<Vector2>,
    /// Group-70 flags
    pub flags: PolylineFlags,
}

impl Polyline {
    /// Create a new empty polyline
    pub fn new() -> Self {
        Polyline::default()
    }

    /// Create a polyline from a list of points
    pub fn from_points(points: Vec<Vector2>) -> Self {
        Polyline {
            vertices: points,
            flags: PolylineFlags::empty(),
        }
    }

    /// Add a vertex
    pub fn add_point(&mut self, point: Vector2) {
        self.vertices.push(point);
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Is the polyline closed?
    pub fn is_closed(&self) -> bool {
        self.flags.contains(PolylineFlags::CLOSED)
    }

    /// Close the polyline
    pub fn close(&mut self) {
        self.flags |= PolylineFlags::CLOSED;
    }
}
