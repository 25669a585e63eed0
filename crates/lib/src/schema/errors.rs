//! Error types for schema definition.

use thiserror::Error;

use crate::schema::FieldType;

/// Structured error types for schema construction.
///
/// These are definition-time errors: they surface while a document type is
/// being described, never during normal attribute access, and are not
/// retriable.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A second hash key was declared for the same document type
    #[error("only one hash key is permitted, '{field}' is already declared")]
    OnlyOneHashKeyPermitted { field: String },

    /// A second range key was declared for the same document type
    #[error("only one range key is permitted, '{field}' is already declared")]
    OnlyOneRangeKeyPermitted { field: String },

    /// The hash key field does not resolve to a storage scalar type
    #[error("invalid hash key '{field}': {field_type} is not a key scalar type")]
    InvalidHashKey { field: String, field_type: FieldType },

    /// The range key field does not resolve to a storage scalar type
    #[error("invalid range key '{field}': {field_type} is not a key scalar type")]
    InvalidRangeKey { field: String, field_type: FieldType },

    /// The schema was built without a hash key
    #[error("no hash key declared for table '{table}'")]
    MissingHashKey { table: String },

    /// A field default could not be coerced to the field's declared type
    #[error("default value for field '{field}' is not valid: {reason}")]
    InvalidDefault { field: String, reason: String },
}

impl SchemaError {
    /// Check if this error is related to key declarations
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            SchemaError::OnlyOneHashKeyPermitted { .. }
                | SchemaError::OnlyOneRangeKeyPermitted { .. }
                | SchemaError::InvalidHashKey { .. }
                | SchemaError::InvalidRangeKey { .. }
                | SchemaError::MissingHashKey { .. }
        )
    }

    /// Get the field name associated with this error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaError::OnlyOneHashKeyPermitted { field }
            | SchemaError::OnlyOneRangeKeyPermitted { field }
            | SchemaError::InvalidHashKey { field, .. }
            | SchemaError::InvalidRangeKey { field, .. }
            | SchemaError::InvalidDefault { field, .. } => Some(field),
            _ => None,
        }
    }
}

// Conversion from SchemaError to the main Error type
impl From<SchemaError> for crate::Error {
    fn from(err: SchemaError) -> Self {
        crate::Error::Schema(err)
    }
}
