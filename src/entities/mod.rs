//! Drawing entity types
//!
//! Each recognized entity kind has its own module with a plain data
//! struct and small geometric helpers. The kinds are closed over the
//! [`EntityKind`] sum; rendering dispatches on the variant rather than
//! on type-name strings.

use crate::types::Color;

pub mod arc;
pub mod attribute;
pub mod circle;
pub mod ellipse;
pub mod insert;
pub mod leader;
pub mod line;
pub mod point;
pub mod polyline;
pub mod solid;
pub mod spline;
pub mod text;

pub use arc::Arc;
pub use attribute::Attribute;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use insert::Insert;
pub use leader::Leader;
pub use line::Line;
pub use point::Point;
pub use polyline::{Polyline, PolylineFlags};
pub use solid::SolidFace;
pub use spline::{Spline, SplineFlags};
pub use text::Text;

/// The closed set of renderable entity kinds
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Ellipse(Ellipse),
    Polyline(Polyline),
    Spline(Spline),
    Text(Text),
    Point(Point),
    Insert(Insert),
    SolidFace(SolidFace),
    Leader(Leader),
    Attribute(Attribute),
}

impl EntityKind {
    /// Short name of the kind, for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Line(_) => "LINE",
            EntityKind::Circle(_) => "CIRCLE",
            EntityKind::Arc(_) => "ARC",
            EntityKind::Ellipse(_) => "ELLIPSE",
            EntityKind::Polyline(_) => "POLYLINE",
            EntityKind::Spline(_) => "SPLINE",
            EntityKind::Text(_) => "TEXT",
            EntityKind::Point(_) => "POINT",
            EntityKind::Insert(_) => "INSERT",
            EntityKind::SolidFace(_) => "SOLID",
            EntityKind::Leader(_) => "LEADER",
            EntityKind::Attribute(_) => "ATTRIB",
        }
    }
}

/// A drawing entity: geometry plus the display properties the preview
/// needs (owning layer and color)
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Name of the owning layer
    pub layer: String,
    /// Entity color (defaults to ByLayer)
    pub color: Color,
    /// The geometry
    pub kind: EntityKind,
}

impl Entity {
    /// Create an entity on layer "0" with ByLayer color
    pub fn new(kind: EntityKind) -> Self {
        Entity {
            layer: "0".to_string(),
            color: Color::ByLayer,
            kind,
        }
    }

    /// Create an entity on a specific layer
    pub fn on_layer(kind: EntityKind, layer: impl Into<String>) -> Self {
        Entity {
            layer: layer.into(),
            color: Color::ByLayer,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector2;

    #[test]
    fn test_entity_defaults() {
        let e = Entity::new(EntityKind::Line(Line::from_coords(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(e.layer, "0");
        assert_eq!(e.color, Color::ByLayer);
        assert_eq!(e.kind.name(), "LINE");
    }

    #[test]
    fn test_kind_names() {
        let c = EntityKind::Circle(Circle::from_coords(0.0, 0.0, 1.0));
        assert_eq!(c.name(), "CIRCLE");
        let i = EntityKind::Insert(Insert::new("B", Vector2::ZERO));
        assert_eq!(i.name(), "INSERT");
    }
}
