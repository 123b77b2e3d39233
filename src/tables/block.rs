//! Block definition table entry

use super::TableEntry;
use crate::entities::Entity;
use crate::types::Vector2;

/// A block definition: a named group of entities that INSERT entities
/// reference
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Block name
    pub name: String,
    /// Base point; insert positions are relative to it
    pub base_point: Vector2,
    /// Entities that make up the block
    pub entities: Vec<Entity>,
}

impl Block {
    /// Create a new empty block
    pub fn new(name: impl Into<String>) -> Self {
        Block {
            name: name.into(),
            base_point: Vector2::ZERO,
            entities: Vec::new(),
        }
    }

    /// `true` for anonymous blocks generated by the authoring tool
    /// (hatch fills, dimensions), named with a `*` prefix
    pub fn is_anonymous(&self) -> bool {
        self.name.starts_with('*')
    }
}

impl TableEntry for Block {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
