//! Document type descriptors: field registry and key schema.
//!
//! A [`Schema`] is the immutable description of one document type: its table
//! name, the ordered set of typed fields, and the hash/range key
//! declarations. It is built once with [`SchemaBuilder`] and then shared
//! read-only (behind an `Arc`) by every document instance of that type.

use std::collections::HashMap;
use std::fmt;

use crate::codec;
use crate::value::Value;

mod errors;

pub use errors::SchemaError;

/// The declared type of a field, fixed at registration time.
///
/// The declared type drives coercion on assignment: every raw input passed
/// to a field setter is normalized against this type by the codec, and
/// invalid input is rejected at assignment, not at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 text
    String,
    /// 64-bit signed integer
    Integer,
    /// 64-bit binary float
    Float,
    /// Arbitrary-precision exact decimal
    Decimal,
    /// Strict boolean: only `true`, `false`, or null are accepted
    Boolean,
    /// Raw byte buffer
    Binary,
    /// Ordered collection, element types resolved per element
    List,
    /// String-keyed collection, value types resolved per value
    Map,
    /// Homogeneous set of strings, numbers, or byte buffers
    Set,
}

impl FieldType {
    /// The storage scalar kind this type maps to when used as a key field,
    /// or `None` for types that cannot key an item.
    pub fn key_type(self) -> Option<KeyType> {
        match self {
            FieldType::String => Some(KeyType::S),
            FieldType::Integer | FieldType::Float | FieldType::Decimal => Some(KeyType::N),
            FieldType::Binary => Some(KeyType::B),
            FieldType::Boolean | FieldType::List | FieldType::Map | FieldType::Set => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "String",
            FieldType::Integer => "Integer",
            FieldType::Float => "Float",
            FieldType::Decimal => "Decimal",
            FieldType::Boolean => "Boolean",
            FieldType::Binary => "Binary",
            FieldType::List => "List",
            FieldType::Map => "Map",
            FieldType::Set => "Set",
        };
        f.write_str(name)
    }
}

/// The storage scalar kind of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// String
    S,
    /// Number
    N,
    /// Binary
    B,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::S => "S",
            KeyType::N => "N",
            KeyType::B => "B",
        };
        f.write_str(name)
    }
}

/// The definition of a single field: name, declared type, and options.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// The attribute name as stored
    pub name: String,
    /// The declared type, never changed after registration
    pub field_type: FieldType,
    /// Default value applied to new documents
    pub default: Option<Value>,
    /// Human-readable label
    pub label: Option<String>,
}

impl FieldDef {
    /// A plain field definition with no options.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldDef {
            name: name.into(),
            field_type,
            default: None,
            label: None,
        }
    }
}

/// Insertion-order-preserving registry of field definitions.
///
/// Re-registering a name replaces the definition in place without changing
/// its position, matching build-time redeclaration semantics.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    defs: Vec<FieldDef>,
    index: HashMap<String, usize>,
}

impl FieldRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field, replacing any previous definition of the same name.
    pub fn add(&mut self, def: FieldDef) {
        match self.index.get(&def.name) {
            Some(&pos) => self.defs[pos] = def,
            None => {
                self.index.insert(def.name.clone(), self.defs.len());
                self.defs.push(def);
            }
        }
    }

    /// Look up a field definition by name.
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.index.get(name).map(|&pos| &self.defs[pos])
    }

    /// True when a field of this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defs.iter().map(|d| d.name.as_str())
    }

    /// Field definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.defs.iter()
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// True when no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// A key declaration: the field it binds and its storage scalar kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRef {
    /// Name of the registered field serving as this key
    pub field: String,
    /// The storage scalar kind of the key attribute
    pub key_type: KeyType,
}

/// The key declarations of a document type: one hash key, at most one
/// range key.
#[derive(Debug, Clone)]
pub struct KeySchema {
    hash: KeyRef,
    range: Option<KeyRef>,
}

impl KeySchema {
    /// The hash (partition) key declaration.
    pub fn hash_key(&self) -> &KeyRef {
        &self.hash
    }

    /// The range key declaration, if one exists.
    pub fn range_key(&self) -> Option<&KeyRef> {
        self.range.as_ref()
    }

    /// All key declarations, hash key first.
    pub fn iter(&self) -> impl Iterator<Item = &KeyRef> {
        std::iter::once(&self.hash).chain(self.range.as_ref())
    }
}

/// The immutable descriptor of a document type.
#[derive(Debug, Clone)]
pub struct Schema {
    table_name: String,
    fields: FieldRegistry,
    keys: KeySchema,
}

impl Schema {
    /// Start describing a document type stored in `table_name`.
    pub fn builder(table_name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            table_name: table_name.into(),
            fields: FieldRegistry::new(),
            hash: None,
            range: None,
        }
    }

    /// The storage table this document type persists to.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The field registry.
    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    /// The key declarations.
    pub fn keys(&self) -> &KeySchema {
        &self.keys
    }

    /// The `(attribute name, key type)` pairs of all key fields, suitable
    /// for table definition at the storage boundary.
    pub fn attribute_definitions(&self) -> Vec<(&str, KeyType)> {
        self.keys
            .iter()
            .map(|k| (k.field.as_str(), k.key_type))
            .collect()
    }
}

/// Builder for [`Schema`].
///
/// Key declarations register their field implicitly, so the common case
/// reads top to bottom:
///
/// ```
/// # use dynadoc::schema::{FieldType, Schema};
/// let schema = Schema::builder("people")
///     .hash_key("id", FieldType::String)?
///     .field("first_name", FieldType::String)
///     .field("age", FieldType::Integer)
///     .build()?;
/// assert_eq!(schema.table_name(), "people");
/// # Ok::<(), dynadoc::Error>(())
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    table_name: String,
    fields: FieldRegistry,
    hash: Option<KeyRef>,
    range: Option<KeyRef>,
}

impl SchemaBuilder {
    /// Register a plain field.
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.add(FieldDef::new(name, field_type));
        self
    }

    /// Register a field with options (default value, label).
    pub fn field_def(mut self, def: FieldDef) -> Self {
        self.fields.add(def);
        self
    }

    /// Declare the hash key, registering its field.
    ///
    /// Fails when a hash key is already declared or the type does not
    /// resolve to a storage scalar.
    pub fn hash_key(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
    ) -> crate::Result<Self> {
        let name = name.into();
        if let Some(existing) = &self.hash {
            return Err(SchemaError::OnlyOneHashKeyPermitted {
                field: existing.field.clone(),
            }
            .into());
        }
        let key_type = field_type.key_type().ok_or(SchemaError::InvalidHashKey {
            field: name.clone(),
            field_type,
        })?;
        self.fields.add(FieldDef::new(name.clone(), field_type));
        self.hash = Some(KeyRef {
            field: name,
            key_type,
        });
        Ok(self)
    }

    /// Declare the range key, registering its field.
    pub fn range_key(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
    ) -> crate::Result<Self> {
        let name = name.into();
        if let Some(existing) = &self.range {
            return Err(SchemaError::OnlyOneRangeKeyPermitted {
                field: existing.field.clone(),
            }
            .into());
        }
        let key_type = field_type.key_type().ok_or(SchemaError::InvalidRangeKey {
            field: name.clone(),
            field_type,
        })?;
        self.fields.add(FieldDef::new(name.clone(), field_type));
        self.range = Some(KeyRef {
            field: name,
            key_type,
        });
        Ok(self)
    }

    /// Finalize the schema.
    ///
    /// Requires a hash key and verifies that every declared default value
    /// coerces cleanly to its field's type, so document construction can
    /// apply defaults infallibly.
    pub fn build(mut self) -> crate::Result<Schema> {
        let hash = self.hash.take().ok_or(SchemaError::MissingHashKey {
            table: self.table_name.clone(),
        })?;

        for def in self.fields.defs.iter_mut() {
            if let Some(default) = def.default.take() {
                let normalized = codec::simple_attribute(def.field_type, default).map_err(|e| {
                    SchemaError::InvalidDefault {
                        field: def.name.clone(),
                        reason: e.to_string(),
                    }
                })?;
                def.default = Some(normalized);
            }
        }

        Ok(Schema {
            table_name: self.table_name,
            fields: self.fields,
            keys: KeySchema {
                hash,
                range: self.range,
            },
        })
    }
}
