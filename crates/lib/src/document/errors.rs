//! Error types for document state handling.

use thiserror::Error;

/// Structured error types for attribute access on documents.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The attribute name is not registered in the document's schema
    #[error("unknown attribute '{field}' for table '{table}'")]
    UnknownAttribute { table: String, field: String },

    /// A key field is unset or null at a point where the item key is needed
    #[error("key field '{field}' for table '{table}' has no value")]
    MissingKeyValue { table: String, field: String },

    /// A range key value was supplied, but the schema declares no range key
    #[error("table '{table}' declares no range key, but a range key value was given")]
    UnexpectedRangeKey { table: String },
}

impl DocumentError {
    /// Check if this error is an unknown-attribute access
    pub fn is_unknown_attribute(&self) -> bool {
        matches!(self, DocumentError::UnknownAttribute { .. })
    }

    /// Get the field name associated with this error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            DocumentError::UnknownAttribute { field, .. }
            | DocumentError::MissingKeyValue { field, .. } => Some(field),
            DocumentError::UnexpectedRangeKey { .. } => None,
        }
    }
}

// Conversion from DocumentError to the main Error type
impl From<DocumentError> for crate::Error {
    fn from(err: DocumentError) -> Self {
        crate::Error::Document(err)
    }
}
