//! Color representation and ACI resolution for preview rendering

use std::fmt;

/// Hex color used whenever no more specific color can be determined.
pub const DEFAULT_HEX: &str = "#000000";

/// Default AutoCAD color index assigned to layers that carry no
/// explicit color entry.
pub const DEFAULT_ACI: u8 = 7;

/// Represents an entity or layer color as stored in the drawing
///
/// - By index (1-255): AutoCAD Color Index (ACI)
/// - By layer: use the owning layer's color (index 256)
/// - By block: use the inserting block's color (index 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
}

impl Color {
    /// Create a color from a raw group-62 value
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            // Negative means the layer is off; the index is still valid
            _ if index < 0 => Color::Index((-index).min(255) as u8),
            _ => Color::Index(DEFAULT_ACI),
        }
    }

    /// Get the color index (if applicable)
    pub fn index(&self) -> Option<u16> {
        match self {
            Color::ByBlock => Some(0),
            Color::Index(i) => Some(*i as u16),
            Color::ByLayer => Some(256),
        }
    }

    /// Common color constants
    pub const RED: Color = Color::Index(1);
    pub const YELLOW: Color = Color::Index(2);
    pub const GREEN: Color = Color::Index(3);
    pub const CYAN: Color = Color::Index(4);
    pub const BLUE: Color = Color::Index(5);
    pub const MAGENTA: Color = Color::Index(6);
    pub const WHITE: Color = Color::Index(7);
    pub const GRAY: Color = Color::Index(8);
    pub const LIGHT_GRAY: Color = Color::Index(9);

    /// Resolve this color to a hex string for rendering.
    ///
    /// `ByLayer` and `ByBlock` fall through to `layer_color` (the color
    /// of the entity's layer), and finally to [`DEFAULT_HEX`] when the
    /// layer has no usable color either. Total for every input.
    pub fn resolve(&self, layer_color: Option<Color>) -> &'static str {
        match self {
            Color::Index(i) => aci_to_hex(*i),
            Color::ByLayer | Color::ByBlock => match layer_color {
                Some(Color::Index(i)) => aci_to_hex(i),
                _ => DEFAULT_HEX,
            },
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "Index({})", i),
        }
    }
}

/// Map an AutoCAD Color Index to a hex color.
///
/// Only the low indices get distinct colors; previews render on a white
/// background, so index 7 (white in AutoCAD) maps to black. The full
/// 255-entry ACI table is intentionally not reproduced; everything
/// unmapped renders black.
pub fn aci_to_hex(index: u8) -> &'static str {
    match index {
        1 => "#FF0000",
        2 => "#FFFF00",
        3 => "#00FF00",
        4 => "#00FFFF",
        5 => "#0000FF",
        6 => "#FF00FF",
        7 => "#000000",
        8 => "#808080",
        9 => "#C0C0C0",
        _ => DEFAULT_HEX,
    }
}
