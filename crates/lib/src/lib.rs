//!
//! Dynadoc: a typed document mapper for single-table DynamoDB-style
//! key/value stores.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: The native attribute values documents
//!   carry in-process. Numbers stay exact: integers as `i64` and
//!   arbitrary-precision decimals as `value::Number`.
//! * **Codec (`codec`)**: Marshals native values to the tagged wire union
//!   (`codec::AttributeValue`) and back, with strict non-lossy coercion
//!   against declared field types.
//! * **Schemas (`schema::Schema`)**: Immutable descriptors of a document
//!   type: table name, typed fields, hash and range key declarations.
//! * **Documents (`document::Document`)**: Items with coerced attribute
//!   state and dirty tracking, so saves ship only what changed.
//! * **Stores (`store::ItemStore`)**: A pluggable storage boundary
//!   speaking wire-form items. `store::MemoryStore` is the in-process
//!   backend.
//! * **Repositories (`repository::Repository`)**: Bind a schema to a store
//!   and move documents across the boundary with conditional inserts and
//!   attribute-level partial updates.

pub mod codec;
pub mod document;
pub mod repository;
pub mod schema;
pub mod store;
pub mod value;

pub use codec::{AttributeUpdate, AttributeValue};
pub use document::Document;
pub use repository::Repository;
pub use schema::{FieldDef, FieldType, Schema};
pub use store::{ItemStore, MemoryStore};
pub use value::{Number, Value};

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured native value errors from the value module
    #[error(transparent)]
    Value(value::ValueError),

    /// Structured marshaling errors from the codec module
    #[error(transparent)]
    Codec(codec::CodecError),

    /// Structured definition errors from the schema module
    #[error(transparent)]
    Schema(schema::SchemaError),

    /// Structured attribute access errors from the document module
    #[error(transparent)]
    Document(document::DocumentError),

    /// Structured storage boundary errors from the store module
    #[error(transparent)]
    Store(store::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::Value(_) => "value",
            Error::Codec(_) => "codec",
            Error::Schema(_) => "schema",
            Error::Document(_) => "document",
            Error::Store(_) => "store",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a write conflict.
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error came from type checking or coercion.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Codec(codec_err) => {
                codec_err.is_invalid_type() || codec_err.is_coercion_error()
            }
            Error::Value(value_err) => value_err.is_number_error(),
            _ => false,
        }
    }
}
