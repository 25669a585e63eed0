//! Documents: typed attribute state with dirty tracking.
//!
//! A [`Document`] is one item of a document type described by a [`Schema`].
//! It holds coerced native attribute values, knows whether it has ever been
//! persisted, and tracks which attributes changed since the last
//! persistence point so a save can ship a minimal partial update.
//!
//! Assignment is the validation boundary. [`Document::set`] coerces the
//! incoming value against the field's declared type and fails without
//! touching state when the value does not convert transparently. Change
//! detection is value-based: writing a value and then restoring the
//! original reports the attribute as unchanged.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::codec::{self, AttributeUpdate, AttributeValue};
use crate::schema::Schema;
use crate::value::Value;

mod changes;
mod errors;

pub use changes::ChangeSet;
pub use errors::DocumentError;

/// One item of a document type.
#[derive(Debug, Clone)]
pub struct Document {
    schema: Arc<Schema>,
    attributes: BTreeMap<String, Value>,
    changes: ChangeSet,
    new_record: bool,
}

impl Document {
    /// A fresh, never-persisted document with schema defaults applied.
    ///
    /// Defaults count as changes, so a subsequent save writes them.
    pub fn new(schema: Arc<Schema>) -> Self {
        let defaults: Vec<(String, Value)> = schema
            .fields()
            .iter()
            .filter_map(|def| {
                def.default
                    .as_ref()
                    .map(|value| (def.name.clone(), value.clone()))
            })
            .collect();

        let mut doc = Document {
            schema,
            attributes: BTreeMap::new(),
            changes: ChangeSet::new(),
            new_record: true,
        };
        for (name, value) in defaults {
            doc.changes.record(&name, Value::Null);
            doc.attributes.insert(name, value);
        }
        doc
    }

    /// Rehydrate a document from stored attribute values.
    ///
    /// Every attribute name must be registered in the schema, and each
    /// value is normalized against its field's declared type. The result
    /// is clean and marked persisted.
    pub fn from_stored(
        schema: Arc<Schema>,
        attributes: impl IntoIterator<Item = (String, Value)>,
    ) -> crate::Result<Self> {
        let mut doc = Document {
            schema,
            attributes: BTreeMap::new(),
            changes: ChangeSet::new(),
            new_record: false,
        };
        for (name, value) in attributes {
            let def = doc
                .schema
                .fields()
                .get(&name)
                .ok_or_else(|| doc.unknown_attribute(&name))?;
            let coerced = codec::simple_attribute(def.field_type, value)?;
            if !coerced.is_null() {
                doc.attributes.insert(name, coerced);
            }
        }
        Ok(doc)
    }

    /// The schema this document belongs to.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// True when this document has never been persisted.
    pub fn is_new(&self) -> bool {
        self.new_record
    }

    /// The current attribute values.
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Assign an attribute, coercing against the declared field type.
    ///
    /// A null value removes the attribute. The first write since the last
    /// persistence point records the attribute's before-value for change
    /// reporting. Invalid values fail here and leave the document as it
    /// was.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> crate::Result<()> {
        let def = self
            .schema
            .fields()
            .get(name)
            .ok_or_else(|| self.unknown_attribute(name))?;
        let coerced = codec::simple_attribute(def.field_type, value.into())?;

        let before = self.current_or_null(name);
        self.changes.record(name, before);
        if coerced.is_null() {
            self.attributes.remove(name);
        } else {
            self.attributes.insert(name.to_string(), coerced);
        }
        Ok(())
    }

    /// Read an attribute.
    ///
    /// Fails for unregistered names; returns `None` for registered but
    /// unset attributes.
    pub fn get(&self, name: &str) -> crate::Result<Option<&Value>> {
        if !self.schema.fields().contains(name) {
            return Err(self.unknown_attribute(name).into());
        }
        Ok(self.attributes.get(name))
    }

    /// True when the attribute has a usable value.
    ///
    /// Blank values (null, empty text, empty containers) are not present,
    /// with the single exception of `false`, which is.
    pub fn attribute_present(&self, name: &str) -> bool {
        match self.attributes.get(name) {
            Some(value) => !value.is_blank() || *value == Value::Bool(false),
            None => false,
        }
    }

    /// True when any attribute differs from its last-persisted value.
    pub fn is_changed(&self) -> bool {
        self.changes
            .iter()
            .any(|(name, before)| self.current_or_null(name) != *before)
    }

    /// True when this attribute differs from its last-persisted value.
    ///
    /// Comparison is by value: restoring the original value reports
    /// unchanged even though writes happened in between.
    pub fn changed(&self, name: &str) -> bool {
        match self.changes.before(name) {
            Some(before) => self.current_or_null(name) != *before,
            None => false,
        }
    }

    /// The `(before, after)` pairs of every changed attribute.
    pub fn changes(&self) -> BTreeMap<String, (Value, Value)> {
        self.changes
            .iter()
            .filter_map(|(name, before)| {
                let after = self.current_or_null(name);
                (after != *before).then(|| (name.to_string(), (before.clone(), after)))
            })
            .collect()
    }

    /// The names of every changed attribute.
    pub fn changed_fields(&self) -> Vec<String> {
        self.changes().into_keys().collect()
    }

    /// The attribute-level operations a partial update needs.
    ///
    /// Changed attributes with a value become `PUT`; attributes that went
    /// to null become `DELETE`. Unchanged attributes do not appear.
    pub fn diff_for_update(&self) -> crate::Result<BTreeMap<String, AttributeUpdate>> {
        let mut updates = BTreeMap::new();
        for (name, (_, after)) in self.changes() {
            let update = if after.is_null() {
                AttributeUpdate::Delete
            } else {
                let def = self
                    .schema
                    .fields()
                    .get(&name)
                    .ok_or_else(|| self.unknown_attribute(&name))?;
                AttributeUpdate::Put(codec::marshal(def.field_type, &after)?)
            };
            updates.insert(name, update);
        }
        Ok(updates)
    }

    /// Mark all pending changes as persisted, atomically.
    pub fn changes_applied(&mut self) {
        self.changes.clear();
    }

    /// The wire-form key attributes identifying this item.
    ///
    /// Fails when any key field is unset or null.
    pub fn key_selector(&self) -> crate::Result<BTreeMap<String, AttributeValue>> {
        let mut selector = BTreeMap::new();
        for key in self.schema.keys().iter() {
            let value = self
                .attributes
                .get(&key.field)
                .filter(|v| !v.is_null())
                .ok_or_else(|| DocumentError::MissingKeyValue {
                    table: self.schema.table_name().to_string(),
                    field: key.field.clone(),
                })?;
            let def = self
                .schema
                .fields()
                .get(&key.field)
                .ok_or_else(|| self.unknown_attribute(&key.field))?;
            selector.insert(key.field.clone(), codec::marshal(def.field_type, value)?);
        }
        Ok(selector)
    }

    /// The full wire-form item for this document.
    pub fn to_item(&self) -> crate::Result<BTreeMap<String, AttributeValue>> {
        let mut item = BTreeMap::new();
        for (name, value) in &self.attributes {
            let def = self
                .schema
                .fields()
                .get(name)
                .ok_or_else(|| self.unknown_attribute(name))?;
            item.insert(name.clone(), codec::marshal(def.field_type, value)?);
        }
        Ok(item)
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.new_record = false;
        self.changes.clear();
    }

    pub(crate) fn mark_unpersisted(&mut self) {
        self.new_record = true;
    }

    fn current_or_null(&self, name: &str) -> Value {
        self.attributes.get(name).cloned().unwrap_or(Value::Null)
    }

    fn unknown_attribute(&self, name: &str) -> DocumentError {
        DocumentError::UnknownAttribute {
            table: self.schema.table_name().to_string(),
            field: name.to_string(),
        }
    }
}
