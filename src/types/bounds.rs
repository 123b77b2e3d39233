//! Bounding box types and the render-time bounds accumulator

use super::Vector2;
use std::fmt;

/// 2D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    /// Minimum point (lower-left corner)
    pub min: Vector2,
    /// Maximum point (upper-right corner)
    pub max: Vector2,
}

impl BoundingBox2D {
    /// Create a new bounding box from min and max points
    pub fn new(min: Vector2, max: Vector2) -> Self {
        BoundingBox2D { min, max }
    }

    /// Create a bounding box from a single point
    pub fn from_point(point: Vector2) -> Self {
        BoundingBox2D {
            min: point,
            max: point,
        }
    }

    /// Create a bounding box that contains all given points
    pub fn from_points(points: &[Vector2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_x = points[0].x;
        let mut min_y = points[0].y;
        let mut max_x = points[0].x;
        let mut max_y = points[0].y;

        for point in points.iter().skip(1) {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Some(BoundingBox2D {
            min: Vector2::new(min_x, min_y),
            max: Vector2::new(max_x, max_y),
        })
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Expand the bounding box to include another point
    pub fn expand_to_include(&mut self, point: Vector2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Merge with another bounding box
    pub fn merge(&self, other: &BoundingBox2D) -> BoundingBox2D {
        BoundingBox2D {
            min: Vector2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vector2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

impl fmt::Display for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox2D[{} -> {}]", self.min, self.max)
    }
}

/// Accumulates drawing extents as coordinates are emitted during
/// rendering.
///
/// Non-finite coordinates are ignored. If nothing finite was recorded
/// by the time [`BoundsTracker::finish`] is called, a fixed
/// (0,0)-(1000,1000) box is substituted so the produced viewBox is
/// always valid.
#[derive(Debug, Clone, Default)]
pub struct BoundsTracker {
    bounds: Option<BoundingBox2D>,
}

impl BoundsTracker {
    /// Fallback extents used when a drawing yields no finite coordinates.
    pub const FALLBACK: BoundingBox2D = BoundingBox2D {
        min: Vector2::ZERO,
        max: Vector2::new(1000.0, 1000.0),
    };

    /// Create an empty tracker
    pub fn new() -> Self {
        BoundsTracker { bounds: None }
    }

    /// Record a coordinate. NaN or infinite components are discarded.
    pub fn record(&mut self, point: Vector2) {
        if !point.is_finite() {
            return;
        }
        match &mut self.bounds {
            Some(b) => b.expand_to_include(point),
            None => self.bounds = Some(BoundingBox2D::from_point(point)),
        }
    }

    /// `true` when at least one finite coordinate was recorded
    pub fn has_extent(&self) -> bool {
        self.bounds.is_some()
    }

    /// Final extents: the accumulated box, or the fallback box when
    /// nothing finite was recorded.
    pub fn finish(&self) -> BoundingBox2D {
        self.bounds.unwrap_or(Self::FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox2d_from_points() {
        let points = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(10.0, 5.0),
            Vector2::new(-5.0, 3.0),
        ];
        let bbox = BoundingBox2D::from_points(&points).unwrap();
        assert_eq!(bbox.min, Vector2::new(-5.0, 0.0));
        assert_eq!(bbox.max, Vector2::new(10.0, 5.0));
    }

    #[test]
    fn test_bbox2d_dimensions() {
        let bbox = BoundingBox2D::new(Vector2::new(0.0, 0.0), Vector2::new(10.0, 5.0));
        assert_eq!(bbox.width(), 10.0);
        assert_eq!(bbox.height(), 5.0);
        assert_eq!(bbox.center(), Vector2::new(5.0, 2.5));
    }

    #[test]
    fn test_bbox2d_contains() {
        let bbox = BoundingBox2D::new(Vector2::new(0.0, 0.0), Vector2::new(10.0, 10.0));
        assert!(bbox.contains(Vector2::new(5.0, 5.0)));
        assert!(!bbox.contains(Vector2::new(15.0, 5.0)));
    }

    #[test]
    fn test_tracker_accumulates() {
        let mut t = BoundsTracker::new();
        t.record(Vector2::new(2.0, 3.0));
        t.record(Vector2::new(-1.0, 7.0));
        let b = t.finish();
        assert_eq!(b.min, Vector2::new(-1.0, 3.0));
        assert_eq!(b.max, Vector2::new(2.0, 7.0));
    }

    #[test]
    fn test_tracker_empty_fallback() {
        let t = BoundsTracker::new();
        assert!(!t.has_extent());
        let b = t.finish();
        assert_eq!(b.min, Vector2::new(0.0, 0.0));
        assert_eq!(b.max, Vector2::new(1000.0, 1000.0));
    }

    #[test]
    fn test_tracker_ignores_non_finite() {
        let mut t = BoundsTracker::new();
        t.record(Vector2::new(f64::NAN, 1.0));
        t.record(Vector2::new(1.0, f64::INFINITY));
        assert!(!t.has_extent());
        assert_eq!(t.finish(), BoundsTracker::FALLBACK);

        t.record(Vector2::new(4.0, 5.0));
        assert_eq!(t.finish(), BoundingBox2D::from_point(Vector2::new(4.0, 5.0)));
    }

    #[test]
    fn test_tracker_single_point() {
        let mut t = BoundsTracker::new();
        t.record(Vector2::new(3.0, 3.0));
        let b = t.finish();
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
    }
}
