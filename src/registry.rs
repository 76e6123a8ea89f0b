//! In-memory registry of items keyed by id.
//!
//! Items are kept in insertion order. Every operation takes the single
//! registry lock for its whole duration, so id generation and insertion
//! happen in one critical section and a concurrent list never observes a
//! half-applied write.

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Item, ItemUpdate, NewItem};

/// Registry for all items served by the API
#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: RwLock<IndexMap<i64, Item>>,
}

impl ItemRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `items`, in order. Later duplicates of an
    /// id replace earlier ones.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let items = items.into_iter().map(|item| (item.id, item)).collect();
        Self {
            items: RwLock::new(items),
        }
    }

    /// Create a registry holding the three sample items
    pub fn seeded() -> Self {
        Self::with_items(sample_items())
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Items in insertion order, skipping `skip` and returning at most `limit`
    pub fn list(&self, skip: usize, limit: usize) -> Vec<Item> {
        let items = self.items.read();
        items.values().skip(skip).take(limit).cloned().collect()
    }

    pub fn get(&self, id: i64) -> Result<Item> {
        self.items
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound { id })
    }

    /// Store a new item, generating `max(id) + 1` (or 1) when no id is given
    pub fn create(&self, new_item: NewItem) -> Result<Item> {
        new_item.validate()?;

        let mut items = self.items.write();
        let id = match new_item.id {
            Some(id) => id,
            None => next_id(&items)?,
        };
        if items.contains_key(&id) {
            debug!(item_id = id, "Rejecting create for existing id");
            return Err(Error::DuplicateId { id });
        }

        let item = new_item.into_item(id);
        items.insert(id, item.clone());
        info!(item_id = id, name = %item.name, "Created item");
        Ok(item)
    }

    /// Apply a partial update in place and return the result
    pub fn update(&self, id: i64, update: ItemUpdate) -> Result<Item> {
        update.validate()?;

        let mut items = self.items.write();
        let item = items.get_mut(&id).ok_or(Error::NotFound { id })?;

        let nulls = update.explicit_nulls();
        if !nulls.is_empty() {
            debug!(item_id = id, fields = ?nulls, "Ignoring null fields in update");
        }

        update.apply_to(item);
        info!(item_id = id, "Updated item");
        Ok(item.clone())
    }

    /// Remove an item, keeping the order of those that remain
    pub fn delete(&self, id: i64) -> Result<Item> {
        let removed = self
            .items
            .write()
            .shift_remove(&id)
            .ok_or(Error::NotFound { id })?;
        info!(item_id = id, "Deleted item");
        Ok(removed)
    }
}

fn next_id(items: &IndexMap<i64, Item>) -> Result<i64> {
    match items.keys().max() {
        Some(max) => max.checked_add(1).ok_or(Error::IdSpaceExhausted),
        None => Ok(1),
    }
}

/// The items a fresh service starts with
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::new(1, "Item 1", "This is item 1", 50.2),
        Item::new(2, "Item 2", "This is item 2", 30.5),
        Item::new(3, "Item 3", "This is item 3", 45.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_list_paging() {
        let registry = ItemRegistry::seeded();

        assert_eq!(ids(&registry.list(0, 10)), vec![1, 2, 3]);
        assert_eq!(ids(&registry.list(1, 1)), vec![2]);
        assert_eq!(ids(&registry.list(2, 10)), vec![3]);
        assert!(registry.list(5, 10).is_empty());
        assert!(registry.list(0, 0).is_empty());
    }

    #[test]
    fn test_create_generates_next_id() {
        let registry = ItemRegistry::seeded();
        let created = registry.create(NewItem::new("Item 4", "fourth", 1.5)).unwrap();
        assert_eq!(created.id, 4);

        let empty = ItemRegistry::new();
        let created = empty.create(NewItem::new("First", "", 0.0)).unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn test_generated_id_follows_largest_not_latest() {
        let registry = ItemRegistry::seeded();
        registry.create(NewItem::new("Far", "", 1.0).with_id(40)).unwrap();
        registry.create(NewItem::new("Near", "", 1.0).with_id(5)).unwrap();

        let created = registry.create(NewItem::new("Next", "", 1.0)).unwrap();
        assert_eq!(created.id, 41);
        assert_eq!(ids(&registry.list(0, 10)), vec![1, 2, 3, 40, 5, 41]);
    }

    #[test]
    fn test_create_duplicate_leaves_registry_unchanged() {
        let registry = ItemRegistry::seeded();
        let err = registry
            .create(NewItem::new("Clash", "dup", 9.9).with_id(2))
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateId { id: 2 }));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(2).unwrap().name, "Item 2");
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let registry = ItemRegistry::new();
        let err = registry.create(NewItem::new("", "blank", 1.0)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_id_space_exhausted() {
        let registry = ItemRegistry::with_items([Item::new(i64::MAX, "Last", "", 1.0)]);
        let err = registry.create(NewItem::new("Overflow", "", 1.0)).unwrap_err();
        assert!(matches!(err, Error::IdSpaceExhausted));
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let registry = ItemRegistry::seeded();
        let input = NewItem::new("Widget", "A small widget", -3.25);
        let created = registry.create(input.clone()).unwrap();

        let fetched = registry.get(created.id).unwrap();
        assert_eq!(fetched, input.into_item(created.id));
    }

    #[test]
    fn test_update_changes_only_present_fields() {
        let registry = ItemRegistry::seeded();
        let updated = registry
            .update(1, ItemUpdate::default().name("Renamed"))
            .unwrap();

        assert_eq!(updated, Item::new(1, "Renamed", "This is item 1", 50.2));
        assert_eq!(registry.get(1).unwrap(), updated);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let registry = ItemRegistry::seeded();
        let before = registry.get(3).unwrap();
        let after = registry.update(3, ItemUpdate::default()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let registry = ItemRegistry::seeded();
        assert!(matches!(registry.get(99), Err(Error::NotFound { id: 99 })));
        assert!(matches!(
            registry.update(99, ItemUpdate::default().price(1.0)),
            Err(Error::NotFound { id: 99 })
        ));
        assert!(matches!(registry.delete(99), Err(Error::NotFound { id: 99 })));
    }

    #[test]
    fn test_delete_is_idempotent_in_effect() {
        let registry = ItemRegistry::seeded();
        registry.delete(2).unwrap();

        assert!(matches!(registry.get(2), Err(Error::NotFound { id: 2 })));
        assert!(matches!(registry.delete(2), Err(Error::NotFound { id: 2 })));
        assert_eq!(ids(&registry.list(0, 10)), vec![1, 3]);
    }

    #[test]
    fn test_concurrent_creates_get_distinct_ids() {
        let registry = Arc::new(ItemRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|i| {
                            registry
                                .create(NewItem::new(format!("t{n}-{i}"), "", 1.0))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<i64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        all.sort_unstable();

        assert_eq!(all, (1..=200).collect::<Vec<_>>());
    }
}
