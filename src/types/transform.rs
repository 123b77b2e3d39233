//! 2D affine transformations for block insertion

use super::Vector2;

/// 2D affine transform stored as the six coefficients of
///
/// ```text
/// | m11 m12 tx |
/// | m21 m22 ty |
/// |   0   0  1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Transform2 {
    /// Identity transform
    pub const IDENTITY: Transform2 = Transform2 {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Pure translation
    pub fn translation(offset: Vector2) -> Self {
        Transform2 {
            tx: offset.x,
            ty: offset.y,
            ..Self::IDENTITY
        }
    }

    /// Pure rotation around the origin, counter-clockwise, in degrees
    pub fn rotation_degrees(degrees: f64) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        Transform2 {
            m11: cos,
            m12: -sin,
            m21: sin,
            m22: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Pure non-uniform scale around the origin
    pub fn scale(sx: f64, sy: f64) -> Self {
        Transform2 {
            m11: sx,
            m22: sy,
            ..Self::IDENTITY
        }
    }

    /// Block-insertion transform: scale, then rotate, then translate.
    pub fn insertion(position: Vector2, rotation_degrees: f64, sx: f64, sy: f64) -> Self {
        Self::translation(position)
            .compose(&Self::rotation_degrees(rotation_degrees))
            .compose(&Self::scale(sx, sy))
    }

    /// Matrix product `self * other`: the resulting transform applies
    /// `other` first, then `self`.
    pub fn compose(&self, other: &Transform2) -> Transform2 {
        Transform2 {
            m11: self.m11 * other.m11 + self.m12 * other.m21,
            m12: self.m11 * other.m12 + self.m12 * other.m22,
            m21: self.m21 * other.m11 + self.m22 * other.m21,
            m22: self.m21 * other.m12 + self.m22 * other.m22,
            tx: self.m11 * other.tx + self.m12 * other.ty + self.tx,
            ty: self.m21 * other.tx + self.m22 * other.ty + self.ty,
        }
    }

    /// Transform a point
    pub fn apply(&self, point: Vector2) -> Vector2 {
        Vector2::new(
            self.m11 * point.x + self.m12 * point.y + self.tx,
            self.m21 * point.x + self.m22 * point.y + self.ty,
        )
    }

    /// Transform a distance along X (for radii and text heights under
    /// uniform scale; non-uniform scale uses the X factor).
    pub fn apply_scalar(&self, value: f64) -> f64 {
        let unit = Vector2::new(self.m11, self.m21);
        value * unit.length()
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector2, b: Vector2) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_identity() {
        let p = Vector2::new(3.0, -2.0);
        assert_eq!(Transform2::IDENTITY.apply(p), p);
    }

    #[test]
    fn test_translation() {
        let t = Transform2::translation(Vector2::new(5.0, -1.0));
        assert_eq!(t.apply(Vector2::new(1.0, 1.0)), Vector2::new(6.0, 0.0));
    }

    #[test]
    fn test_rotation_90() {
        let t = Transform2::rotation_degrees(90.0);
        assert!(approx(t.apply(Vector2::UNIT_X), Vector2::UNIT_Y));
    }

    #[test]
    fn test_insertion_order() {
        // Unit X segment scaled by (2,2), rotated 90deg, moved to (10,10)
        // lands at (10,12): scale happens before rotation.
        let t = Transform2::insertion(Vector2::new(10.0, 10.0), 90.0, 2.0, 2.0);
        assert!(approx(t.apply(Vector2::ZERO), Vector2::new(10.0, 10.0)));
        assert!(approx(t.apply(Vector2::UNIT_X), Vector2::new(10.0, 12.0)));
    }

    #[test]
    fn test_compose_application_order() {
        let scale = Transform2::scale(2.0, 2.0);
        let shift = Transform2::translation(Vector2::new(1.0, 0.0));
        // shift.compose(&scale) applies scale first.
        let t = shift.compose(&scale);
        assert!(approx(t.apply(Vector2::UNIT_X), Vector2::new(3.0, 0.0)));
    }

    #[test]
    fn test_apply_scalar_uniform() {
        let t = Transform2::insertion(Vector2::new(4.0, 4.0), 30.0, 3.0, 3.0);
        assert!((t.apply_scalar(2.0) - 6.0).abs() < 1e-9);
    }
}
