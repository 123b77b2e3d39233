//! Insert entity (block reference)

use crate::types::{Transform2, Vector2};

/// A block reference
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Name of the referenced block
    pub block_name: String,
    /// Insertion point
    pub position: Vector2,
    /// X scale factor
    pub scale_x: f64,
    /// Y scale factor
    pub scale_y: f64,
    /// Rotation angle, counter-clockwise degrees
    pub rotation: f64,
}

impl Insert {
    /// Create a new insert referencing a block by name
    pub fn new(block_name: impl Into<String>, position: Vector2) -> Self {
        Insert {
            block_name: block_name.into(),
            position,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }

    /// The transform this insert applies to its block's geometry:
    /// scale, then rotate, then translate.
    pub fn transform(&self) -> Transform2 {
        Transform2::insertion(self.position, self.rotation, self.scale_x, self.scale_y)
    }
}

impl Default for Insert {
    fn default() -> Self {
        Insert::new("", Vector2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_defaults() {
        let ins = Insert::new("DOOR", Vector2::new(5.0, 5.0));
        assert_eq!(ins.scale_x, 1.0);
        assert_eq!(ins.scale_y, 1.0);
        assert_eq!(ins.rotation, 0.0);
    }

    #[test]
    fn test_insert_transform() {
        let mut ins = Insert::new("B", Vector2::new(10.0, 10.0));
        ins.scale_x = 2.0;
        ins.scale_y = 2.0;
        ins.rotation = 90.0;
        let p = ins.transform().apply(Vector2::UNIT_X);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 12.0).abs() < 1e-9);
    }
}
