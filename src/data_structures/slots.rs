//! Ordered tag-to-value slot table.
//!
//! Registries in this crate resolve human-readable tags to resources by
//! insertion order: the first entry registered occupies slot 0, the next
//! slot 1, and so on. Capacity is bounded and overflow is an explicit
//! error rather than a silent write past the end.

use anyhow::{Result, bail};

/// An ordered, bounded mapping from tag to value.
///
/// Lookups are first-match linear scans in insertion order. Duplicate tags
/// are permitted but unreachable: only the earliest entry with a given tag
/// can be found.
#[derive(Debug)]
pub struct SlotTable<T> {
    capacity: usize,
    entries: Vec<(String, T)>,
}

impl<T> SlotTable<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    /// Append an entry and return the slot index it was assigned.
    ///
    /// Fails when the table is full; the table is left unchanged in that
    /// case.
    pub fn insert(&mut self, tag: impl Into<String>, value: T) -> Result<usize> {
        if self.entries.len() >= self.capacity {
            bail!("slot table is full ({} entries)", self.capacity);
        }
        self.entries.push((tag.into(), value));
        Ok(self.entries.len() - 1)
    }

    /// Slot index of the first entry registered under `tag`.
    pub fn slot_of(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|(t, _)| t == tag)
    }

    /// Value of the first entry registered under `tag`.
    pub fn get(&self, tag: &str) -> Option<&T> {
        self.entries.iter().find(|(t, _)| t == tag).map(|(_, v)| v)
    }

    pub fn get_slot(&self, slot: usize) -> Option<&T> {
        self.entries.get(slot).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry, releasing whatever the values own.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_insertion_order() {
        let mut table = SlotTable::with_capacity(8);
        for (i, tag) in ["wood", "tiles", "clay"].iter().enumerate() {
            let slot = table.insert(*tag, i as u32).unwrap();
            assert_eq!(slot, i);
        }
        assert_eq!(table.slot_of("wood"), Some(0));
        assert_eq!(table.slot_of("tiles"), Some(1));
        assert_eq!(table.slot_of("clay"), Some(2));
        assert_eq!(table.get("tiles"), Some(&1));
    }

    #[test]
    fn unknown_tag_is_none() {
        let mut table = SlotTable::with_capacity(4);
        table.insert("wood", 7u32).unwrap();
        assert_eq!(table.slot_of("marble"), None);
        assert_eq!(table.get("marble"), None);
    }

    #[test]
    fn duplicate_tags_resolve_to_first_entry() {
        let mut table = SlotTable::with_capacity(4);
        table.insert("wood", 1u32).unwrap();
        table.insert("wood", 2u32).unwrap();
        assert_eq!(table.slot_of("wood"), Some(0));
        assert_eq!(table.get("wood"), Some(&1));
    }

    #[test]
    fn overflow_is_an_error_and_leaves_table_unchanged() {
        let mut table = SlotTable::with_capacity(2);
        table.insert("a", 0u32).unwrap();
        table.insert("b", 1u32).unwrap();
        assert!(table.insert("c", 2u32).is_err());
        assert_eq!(table.len(), 2);
        assert_eq!(table.slot_of("c"), None);
    }

    #[test]
    fn clear_empties_the_table() {
        let mut table = SlotTable::with_capacity(2);
        table.insert("a", 0u32).unwrap();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.slot_of("a"), None);
        // capacity is a property of the table, not its contents
        assert_eq!(table.capacity(), 2);
    }
}
