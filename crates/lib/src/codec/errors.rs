//! Error types for attribute marshaling.

use thiserror::Error;

use crate::schema::FieldType;

/// Structured error types for marshal/unmarshal operations.
///
/// Marshaling errors surface at assignment time, before any document state
/// changes, so a failed write never leaves a half-coerced value behind.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value's runtime kind is not accepted by the declared field type
    #[error("invalid value for {field_type} field: got {actual} '{value}'")]
    InvalidValueType {
        field_type: FieldType,
        actual: &'static str,
        value: String,
    },

    /// The value is the right kind but would lose information when coerced
    #[error("value '{value}' is not transparently coercible to {field_type}")]
    NotTransparentlyCoercible { field_type: FieldType, value: String },

    /// A set value violates the homogeneity rules
    #[error("invalid set: {reason}")]
    InvalidSet { reason: String },

    /// A wire-side number attribute is not in canonical decimal form
    #[error("malformed wire number '{input}'")]
    InvalidNumber { input: String },
}

impl CodecError {
    /// Check if this error is a declared-type mismatch
    pub fn is_invalid_type(&self) -> bool {
        matches!(self, CodecError::InvalidValueType { .. })
    }

    /// Check if this error is a lossy-coercion rejection
    pub fn is_coercion_error(&self) -> bool {
        matches!(self, CodecError::NotTransparentlyCoercible { .. })
    }

    /// Check if this error came from decoding wire data
    pub fn is_wire_error(&self) -> bool {
        matches!(self, CodecError::InvalidNumber { .. })
    }
}

// Conversion from CodecError to the main Error type
impl From<CodecError> for crate::Error {
    fn from(err: CodecError) -> Self {
        crate::Error::Codec(err)
    }
}
