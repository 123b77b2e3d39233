//! Drawing document structure

use crate::entities::Entity;
use crate::notification::{NotificationCollection, NotificationType};
use crate::tables::{Block, Layer, Table};
use crate::types::Color;
use indexmap::IndexMap;

/// The normalized output of geometry extraction: entities plus the
/// tables the renderer needs
#[derive(Debug, Clone, Default)]
pub struct DrawingDocument {
    /// Top-level entities in source order
    pub entities: Vec<Entity>,
    /// Layer table
    pub layers: Table<Layer>,
    /// Block definition table
    pub blocks: Table<Block>,
    /// Non-fatal issues collected during extraction
    pub notifications: NotificationCollection,
    /// Count of skipped entities per kind name
    pub skipped: IndexMap<String, usize>,
}

impl DrawingDocument {
    /// Create a new document with the standard "0" layer
    pub fn new() -> Self {
        let mut doc = DrawingDocument::default();
        doc.layers.insert(Layer::layer_0());
        doc
    }

    /// Add a top-level entity
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Record a skipped entity kind and notify
    pub fn record_skip(&mut self, kind: &str) {
        *self.skipped.entry(kind.to_string()).or_insert(0) += 1;
        self.notifications.notify(
            NotificationType::NotImplemented,
            format!("{} entity skipped", kind),
        );
    }

    /// Color of a layer by name, if the layer exists
    pub fn layer_color(&self, name: &str) -> Option<Color> {
        self.layers.get(name).map(|l| l.color)
    }

    /// Total number of skipped entities across all kinds
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityKind, Line};

    #[test]
    fn test_document_has_layer_0() {
        let doc = DrawingDocument::new();
        assert!(doc.layers.contains("0"));
        assert_eq!(doc.layers.len(), 1);
    }

    #[test]
    fn test_record_skip_counts() {
        let mut doc = DrawingDocument::new();
        doc.record_skip("MLINE");
        doc.record_skip("MLINE");
        doc.record_skip("WIPEOUT");
        assert_eq!(doc.skipped.get("MLINE"), Some(&2));
        assert_eq!(doc.skipped_total(), 3);
        assert_eq!(doc.notifications.len(), 3);
    }

    #[test]
    fn test_add_entity() {
        let mut doc = DrawingDocument::new();
        doc.add_entity(Entity::new(EntityKind::Line(Line::from_coords(
            0.0, 0.0, 1.0, 1.0,
        ))));
        assert_eq!(doc.entities.len(), 1);
    }

    #[test]
    fn test_layer_color_lookup() {
        let mut doc = DrawingDocument::new();
        doc.layers.insert(Layer::with_color("Walls", Color::RED));
        assert_eq!(doc.layer_color("walls"), Some(Color::RED));
        assert_eq!(doc.layer_color("Missing"), None);
    }
}
