//! Attribute entity (block attribute values)

use super::text::DEFAULT_HEIGHT;
use crate::types::Vector2;

/// A block attribute: tagged text attached to an insert
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute tag name
    pub tag: String,
    /// Attribute value (rendered like text)
    pub value: String,
    /// Insertion point
    pub position: Vector2,
    /// Text height in drawing units
    pub height: f64,
    /// Rotation angle, counter-clockwise degrees
    pub rotation: f64,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(tag: impl Into<String>, value: impl Into<String>, position: Vector2) -> Self {
        Attribute {
            tag: tag.into(),
            value: value.into(),
            position,
            height: DEFAULT_HEIGHT,
            rotation: 0.0,
        }
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Attribute::new("", "", Vector2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_creation() {
        let a = Attribute::new("ROOM", "101", Vector2::new(1.0, 1.0));
        assert_eq!(a.tag, "ROOM");
        assert_eq!(a.value, "101");
        assert_eq!(a.height, DEFAULT_HEIGHT);
    }
}
