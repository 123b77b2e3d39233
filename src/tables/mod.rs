//! Drawing table types (layers and block definitions)

use indexmap::IndexMap;

pub mod block;
pub mod layer;

pub use block::Block;
pub use layer::Layer;

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's name
    fn name(&self) -> &str;

    /// Set the entry's name
    fn set_name(&mut self, name: String);

    /// Check if this is a standard/default entry
    fn is_standard(&self) -> bool {
        false
    }
}

/// Generic table for storing named entries
///
/// Entries keep insertion order, so layer lists and rendered output are
/// deterministic for a given input.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    /// Entries stored by name (case-insensitive)
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry, replacing any existing entry with the same name
    pub fn insert(&mut self, entry: T) {
        self.entries.insert(entry.name().to_uppercase(), entry);
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Get a mutable entry by name (case-insensitive)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Get all entry names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.name())
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct MockEntry {
        name: String,
    }

    impl TableEntry for MockEntry {
        fn name(&self) -> &str {
            &self.name
        }

        fn set_name(&mut self, name: String) {
            self.name = name;
        }
    }

    #[test]
    fn test_table_insert_and_get() {
        let mut table = Table::new();
        table.insert(MockEntry {
            name: "Test".to_string(),
        });

        assert!(table.contains("Test"));
        assert!(table.contains("test")); // Case-insensitive
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_insert_replaces() {
        let mut table = Table::new();
        table.insert(MockEntry {
            name: "Walls".to_string(),
        });
        table.insert(MockEntry {
            name: "WALLS".to_string(),
        });
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_preserves_order() {
        let mut table = Table::new();
        for name in ["C", "A", "B"] {
            table.insert(MockEntry {
                name: name.to_string(),
            });
        }
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
