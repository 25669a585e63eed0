//! Repository: persistence orchestration for one document type.
//!
//! A [`Repository`] binds a [`Schema`] to an [`ItemStore`] and moves
//! documents across the storage boundary. New documents are written with a
//! conditional full put; persisted documents ship only their changed
//! attributes as a partial update. On any storage failure the document is
//! left untouched, dirty state included, so the caller can retry or
//! inspect.

use std::sync::Arc;

use tracing::debug;

use crate::codec;
use crate::document::Document;
use crate::schema::Schema;
use crate::store::{ItemStore, KeySelector};
use crate::value::Value;


/// The persistence gateway for one document type.
pub struct Repository {
    schema: Arc<Schema>,
    store: Arc<dyn ItemStore>,
}

impl Repository {
    /// A repository over `schema`, persisting through `store`.
    pub fn new(schema: Arc<Schema>, store: Arc<dyn ItemStore>) -> Self {
        Repository { schema, store }
    }

    /// The schema this repository persists.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// A fresh, never-persisted document of this repository's type.
    pub fn new_document(&self) -> Document {
        Document::new(self.schema.clone())
    }

    /// Build a document from attribute pairs and save it.
    pub fn create<N, V>(
        &self,
        attributes: impl IntoIterator<Item = (N, V)>,
    ) -> crate::Result<Document>
    where
        N: AsRef<str>,
        V: Into<Value>,
    {
        let mut doc = self.new_document();
        for (name, value) in attributes {
            doc.set(name.as_ref(), value)?;
        }
        self.save(&mut doc)?;
        Ok(doc)
    }

    /// Persist a document.
    ///
    /// A new document becomes a conditional full put, so saving the same
    /// key twice surfaces the store's conflict error. A persisted document
    /// becomes a partial update of its changed attributes, or a no-op when
    /// nothing changed. Success clears the document's dirty state.
    pub fn save(&self, doc: &mut Document) -> crate::Result<()> {
        let table = self.schema.table_name();
        let key = doc.key_selector()?;

        if doc.is_new() {
            let item = doc.to_item()?;
            debug!(table, "saving new document");
            self.store.put_item(table, &key, item)?;
            doc.mark_persisted();
            return Ok(());
        }

        let updates = doc.diff_for_update()?;
        if updates.is_empty() {
            debug!(table, "document unchanged, skipping save");
            return Ok(());
        }
        debug!(table, updates = updates.len(), "saving changed attributes");
        self.store.update_item(table, &key, updates)?;
        doc.changes_applied();
        Ok(())
    }

    /// Load the document stored under the given key values.
    ///
    /// Key values are coerced against the key fields' declared types, so
    /// `find("abc", None)` and `find(Value::from("abc"), None)` behave the
    /// same. The values must cover the full primary key: a schema with a
    /// range key requires `Some(range)`, one without rejects it. Returns
    /// `None` when no item exists.
    pub fn find(
        &self,
        hash: impl Into<Value>,
        range: Option<Value>,
    ) -> crate::Result<Option<Document>> {
        let table = self.schema.table_name();
        let key = self.key_selector(hash.into(), range)?;

        let item = match self.store.get_item(table, &key, None)? {
            Some(item) => item,
            None => {
                debug!(table, "no item under key");
                return Ok(None);
            }
        };

        let mut attributes = Vec::with_capacity(item.len());
        for (name, attr) in &item {
            attributes.push((name.clone(), codec::unmarshal(attr)?));
        }
        let doc = Document::from_stored(self.schema.clone(), attributes)?;
        Ok(Some(doc))
    }

    /// Remove a document's item from the store.
    ///
    /// The document reverts to never-persisted, so a later save re-inserts
    /// it.
    pub fn delete(&self, doc: &mut Document) -> crate::Result<()> {
        let table = self.schema.table_name();
        let key = doc.key_selector()?;
        debug!(table, "deleting document");
        self.store.delete_item(table, &key)?;
        doc.mark_unpersisted();
        Ok(())
    }

    fn key_selector(&self, hash: Value, range: Option<Value>) -> crate::Result<KeySelector> {
        let mut selector = KeySelector::new();
        let keys = self.schema.keys();

        let hash_field = &keys.hash_key().field;
        selector.insert(hash_field.clone(), self.marshal_key(hash_field, hash)?);

        // The selector must cover the full primary key, no more and no less.
        match (keys.range_key(), range) {
            (Some(range_key), Some(value)) => {
                selector.insert(
                    range_key.field.clone(),
                    self.marshal_key(&range_key.field, value)?,
                );
            }
            (Some(range_key), None) => {
                return Err(crate::document::DocumentError::MissingKeyValue {
                    table: self.schema.table_name().to_string(),
                    field: range_key.field.clone(),
                }
                .into());
            }
            (None, Some(_)) => {
                return Err(crate::document::DocumentError::UnexpectedRangeKey {
                    table: self.schema.table_name().to_string(),
                }
                .into());
            }
            (None, None) => {}
        }
        Ok(selector)
    }

    fn marshal_key(
        &self,
        field: &str,
        value: Value,
    ) -> crate::Result<crate::codec::AttributeValue> {
        let def = self.schema.fields().get(field).ok_or_else(|| {
            crate::document::DocumentError::UnknownAttribute {
                table: self.schema.table_name().to_string(),
                field: field.to_string(),
            }
        })?;
        let coerced = codec::simple_attribute(def.field_type, value)?;
        Ok(codec::marshal(def.field_type, &coerced)?)
    }
}
