//! Filled face entity (SOLID, 3DFACE, HATCH boundaries)

use crate::types::Vector2;

/// A filled polygonal face with three or four corners
///
/// DXF SOLID stores its third and fourth corners swapped relative to
/// polygon winding order; the entity reader normalizes that, so the
/// corners here are always in outline order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolidFace {
    /// Corner points in outline order
    pub corners: Vec<Vector2>,
}

impl SolidFace {
    /// Create a face from corner points
    pub fn new(corners: Vec<Vector2>) -> Self {
        SolidFace { corners }
    }

    /// `true` when there are too few corners to fill anything
    pub fn is_degenerate(&self) -> bool {
        self.corners.len() < 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_face_degenerate() {
        assert!(SolidFace::new(vec![Vector2::ZERO, Vector2::UNIT_X]).is_degenerate());
        assert!(!SolidFace::new(vec![
            Vector2::ZERO,
            Vector2::UNIT_X,
            Vector2::UNIT_Y
        ])
        .is_degenerate());
    }
}
