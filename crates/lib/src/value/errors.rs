//! Error types for native value handling.

use thiserror::Error;

/// Structured error types for native value construction and conversion.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ValueError {
    /// A string could not be read as a canonical decimal number
    #[error("invalid number '{input}': {reason}")]
    InvalidNumber { input: String, reason: String },
}

impl ValueError {
    /// Check if this error is number-related
    pub fn is_number_error(&self) -> bool {
        matches!(self, ValueError::InvalidNumber { .. })
    }
}

// Conversion from ValueError to the main Error type
impl From<ValueError> for crate::Error {
    fn from(err: ValueError) -> Self {
        crate::Error::Value(err)
    }
}
