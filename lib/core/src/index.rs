use crate::normalize::clean;
use crate::record::CatalogRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Reverse mapping from searchable name to catalog row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameIndex {
    rows: BTreeMap<String, usize>,
    #[serde(skip)]
    collisions: usize,
}

impl NameIndex {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index over a catalog.
    ///
    /// When two records share a searchable name the later row wins and the
    /// collision is logged.
    pub fn build(catalog: &[CatalogRecord]) -> Self {
        let mut index = Self::new();
        for (row, record) in catalog.iter().enumerate() {
            index.insert(&record.searchable_name, row);
        }
        if index.collisions > 0 {
            warn!(
                "{} catalog names collided after cleaning; later rows shadow earlier ones",
                index.collisions
            );
        }
        index
    }

    /// Insert a key, returning the row it replaced
    pub fn insert(&mut self, searchable_name: &str, row: usize) -> Option<usize> {
        let previous = self.rows.insert(searchable_name.to_string(), row);
        if let Some(prev) = previous {
            self.collisions += 1;
            warn!(
                key = searchable_name,
                shadowed_row = prev,
                row,
                "Name collision in index"
            );
        }
        previous
    }

    /// Look up a title, cleaning it first
    #[inline]
    pub fn lookup(&self, title: &str) -> Option<usize> {
        self.get(&clean(title))
    }

    /// Look up an already cleaned key
    #[inline]
    pub fn get(&self, searchable_name: &str) -> Option<usize> {
        self.rows.get(searchable_name).copied()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Collisions seen while building (not persisted)
    #[inline]
    #[must_use]
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Largest row referenced by the index
    pub fn max_row(&self) -> Option<usize> {
        self.rows.values().copied().max()
    }
}

// Equality is over the mapping only; the collision counter is build-time state.
impl PartialEq for NameIndex {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for NameIndex {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawFields;

    fn record(name: &str) -> CatalogRecord {
        CatalogRecord::from_raw(&RawFields {
            name: name.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_lookup_cleans_title() {
        let index = NameIndex::build(&[record("Portal 2"), record("Celeste")]);
        assert_eq!(index.lookup("portal 2"), Some(0));
        assert_eq!(index.lookup("  CELESTE "), Some(1));
        assert_eq!(index.lookup("Hades"), None);
    }

    #[test]
    fn test_collision_last_write_wins() {
        let index = NameIndex::build(&[record("Portal 2"), record("Portal2"), record("Braid")]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("portal2"), Some(1));
        assert_eq!(index.collisions(), 1);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let index = NameIndex::build(&[record("Braid")]);
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"{"braid":0}"#);
        let back: NameIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
    }
}
