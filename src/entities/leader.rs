//! Leader entity (annotation arrow polylines, also used for flattened
//! dimensions)

use crate::types::Vector2;

/// A leader line: an open polyline from an annotation toward the
/// feature it points at
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Leader {
    /// Vertices in order
    pub vertices: Vec<Vector2>,
}

impl Leader {
    /// Create a leader from vertices
    pub fn new(vertices: Vec<Vector2>) -> Self {
        Leader { vertices }
    }

    /// Add a vertex
    pub fn add_point(&mut self, point: Vector2) {
        self.vertices.push(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leader_build() {
        let mut l = Leader::default();
        l.add_point(Vector2::ZERO);
        l.add_point(Vector2::new(5.0, 5.0));
        assert_eq!(l.vertices.len(), 2);
    }
}
