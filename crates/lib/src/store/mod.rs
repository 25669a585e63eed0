//! Storage boundary: the [`ItemStore`] trait and backends.
//!
//! Everything above this module works with wire-form items (maps of
//! [`AttributeValue`]) and never sees how a backend stores them. A backend
//! implements the four item operations; [`MemoryStore`] is the in-process
//! reference backend used by tests and local development.

use std::collections::BTreeMap;

use crate::codec::{AttributeUpdate, AttributeValue};

mod errors;
mod memory;
#[cfg(test)]
mod tests;

pub use errors::StoreError;
pub use memory::MemoryStore;

/// A wire-form item: attribute names to tagged values.
pub type Item = BTreeMap<String, AttributeValue>;

/// The wire-form key attributes identifying one item.
pub type KeySelector = BTreeMap<String, AttributeValue>;

/// The item operations a storage backend must provide.
///
/// Writes are item-granular for `put_item` and attribute-granular for
/// `update_item`. Backends are shared across threads behind an `Arc`.
pub trait ItemStore: Send + Sync {
    /// Write a full item, failing if an item already exists under `key`.
    ///
    /// The insert-if-absent condition makes first saves conflict-safe: a
    /// duplicate key surfaces as [`StoreError::ConditionFailed`].
    fn put_item(&self, table: &str, key: &KeySelector, item: Item) -> crate::Result<()>;

    /// Apply attribute-level updates to the item under `key`.
    ///
    /// Upsert semantics: when no item exists, one is created from the key
    /// attributes and the `PUT` updates.
    fn update_item(
        &self,
        table: &str,
        key: &KeySelector,
        updates: BTreeMap<String, AttributeUpdate>,
    ) -> crate::Result<()>;

    /// Read the item under `key`, optionally projecting to a subset of
    /// attributes. Returns `None` when no item exists.
    fn get_item(
        &self,
        table: &str,
        key: &KeySelector,
        attributes_to_get: Option<&[String]>,
    ) -> crate::Result<Option<Item>>;

    /// Remove the item under `key`. Removing an absent item is not an
    /// error.
    fn delete_item(&self, table: &str, key: &KeySelector) -> crate::Result<()>;
}
