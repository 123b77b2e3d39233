//! Text entity (TEXT and MTEXT)

use crate::types::Vector2;

/// Default text height in drawing units, used when the height field is
/// missing from the source entity.
pub const DEFAULT_HEIGHT: f64 = 2.5;

/// A single-line text entity
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Insertion (anchor) point
    pub position: Vector2,
    /// Text height in drawing units
    pub height: f64,
    /// Rotation angle, counter-clockwise degrees
    pub rotation: f64,
    /// The text content
    pub value: String,
}

impl Text {
    /// Create a new text entity
    pub fn new(position: Vector2, value: impl Into<String>) -> Self {
        Text {
            position,
            height: DEFAULT_HEIGHT,
            rotation: 0.0,
            value: value.into(),
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Text::new(Vector2::ZERO, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_default_height() {
        let t = Text::new(Vector2::new(1.0, 2.0), "hello");
        assert_eq!(t.height, DEFAULT_HEIGHT);
        assert_eq!(t.rotation, 0.0);
        assert_eq!(t.value, "hello");
    }
}
