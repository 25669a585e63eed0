//! In-memory item store.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use tracing::debug;

use crate::codec::AttributeUpdate;
use crate::store::{Item, ItemStore, KeySelector, StoreError};

/// An in-process [`ItemStore`] backed by hash maps.
///
/// Tables must be created explicitly with [`MemoryStore::create_table`];
/// operations against unknown tables fail with
/// [`StoreError::TableNotFound`]. All operations take an internal lock, so
/// a shared instance is safe across threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, HashMap<KeySelector, Item>>>,
}

impl MemoryStore {
    /// An empty store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table. Creating an existing table is a no-op.
    pub fn create_table(&self, name: &str) {
        let mut tables = self.lock();
        tables.entry(name.to_string()).or_default();
    }

    /// True when the named table exists.
    pub fn has_table(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Number of items in the named table, if it exists.
    pub fn item_count(&self, name: &str) -> Option<usize> {
        self.lock().get(name).map(|t| t.len())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, HashMap<KeySelector, Item>>> {
        // Lock poisoning only happens when a holder panicked; the map
        // itself is still consistent between operations.
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn missing(table: &str) -> crate::Error {
        StoreError::TableNotFound {
            table: table.to_string(),
        }
        .into()
    }
}

impl ItemStore for MemoryStore {
    fn put_item(&self, table: &str, key: &KeySelector, item: Item) -> crate::Result<()> {
        let mut tables = self.lock();
        let items = tables.get_mut(table).ok_or_else(|| Self::missing(table))?;
        if items.contains_key(key) {
            return Err(StoreError::ConditionFailed {
                table: table.to_string(),
                reason: "an item with this key already exists".to_string(),
            }
            .into());
        }
        debug!(table, "storing new item");
        items.insert(key.clone(), item);
        Ok(())
    }

    fn update_item(
        &self,
        table: &str,
        key: &KeySelector,
        updates: BTreeMap<String, AttributeUpdate>,
    ) -> crate::Result<()> {
        let mut tables = self.lock();
        let items = tables.get_mut(table).ok_or_else(|| Self::missing(table))?;
        // Upsert: an absent item starts as just its key attributes.
        let item = items.entry(key.clone()).or_insert_with(|| key.clone());
        debug!(table, updates = updates.len(), "applying item updates");
        for (name, update) in updates {
            match update {
                AttributeUpdate::Put(value) => {
                    item.insert(name, value);
                }
                AttributeUpdate::Delete => {
                    item.remove(&name);
                }
            }
        }
        Ok(())
    }

    fn get_item(
        &self,
        table: &str,
        key: &KeySelector,
        attributes_to_get: Option<&[String]>,
    ) -> crate::Result<Option<Item>> {
        let tables = self.lock();
        let items = tables.get(table).ok_or_else(|| Self::missing(table))?;
        let item = match items.get(key) {
            Some(item) => item,
            None => return Ok(None),
        };
        let projected = match attributes_to_get {
            Some(names) => item
                .iter()
                .filter(|(k, _)| names.iter().any(|n| n == *k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => item.clone(),
        };
        Ok(Some(projected))
    }

    fn delete_item(&self, table: &str, key: &KeySelector) -> crate::Result<()> {
        let mut tables = self.lock();
        let items = tables.get_mut(table).ok_or_else(|| Self::missing(table))?;
        items.remove(key);
        Ok(())
    }
}
