//! Layer table entry

use super::TableEntry;
use crate::types::{Color, DEFAULT_ACI};

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name
    pub name: String,
    /// Layer color
    pub color: Color,
    /// Line type name
    pub line_type: String,
    /// Is the layer visible? A negative group-62 color or the frozen
    /// flag turns this off.
    pub visible: bool,
}

impl Layer {
    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            name: name.into(),
            color: Color::Index(DEFAULT_ACI),
            line_type: "Continuous".to_string(),
            visible: true,
        }
    }

    /// Create the standard "0" layer
    pub fn layer_0() -> Self {
        Layer::new("0")
    }

    /// Create a layer with a specific color
    pub fn with_color(name: impl Into<String>, color: Color) -> Self {
        Layer {
            color,
            ..Self::new(name)
        }
    }

    /// Hex color this layer resolves to
    pub fn hex_color(&self) -> &'static str {
        self.color.resolve(None)
    }
}

impl TableEntry for Layer {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn is_standard(&self) -> bool {
        self.name == "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_defaults() {
        let l = Layer::new("Walls");
        assert_eq!(l.color, Color::Index(7));
        assert_eq!(l.line_type, "Continuous");
        assert!(l.visible);
    }

    #[test]
    fn test_layer_0_is_standard() {
        assert!(Layer::layer_0().is_standard());
        assert!(!Layer::new("Walls").is_standard());
    }

    #[test]
    fn test_layer_hex_color() {
        let l = Layer::with_color("Red", Color::RED);
        assert_eq!(l.hex_color(), "#FF0000");
        // Default index 7 renders black.
        assert_eq!(Layer::new("L").hex_color(), "#000000");
    }
}
