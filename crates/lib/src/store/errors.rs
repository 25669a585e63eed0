//! Error types for the item store boundary.

use thiserror::Error;

/// Structured error types raised at the storage boundary.
///
/// The mapping layer never generates, catches, or retries these itself.
/// They pass through to the caller unchanged so conflict handling stays a
/// caller decision.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// A conditional write found the condition unmet
    #[error("conditional write to table '{table}' failed: {reason}")]
    ConditionFailed { table: String, reason: String },

    /// The named table does not exist in this store
    #[error("table '{table}' not found")]
    TableNotFound { table: String },

    /// No item exists under the given key
    #[error("no item found in table '{table}' for the given key")]
    ItemNotFound { table: String },

    /// The backend failed for a reason of its own
    #[error("storage backend error on table '{table}': {reason}")]
    Backend { table: String, reason: String },
}

impl StoreError {
    /// Check if this error is a write conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::ConditionFailed { .. })
    }

    /// Check if this error is a missing table or item
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::TableNotFound { .. } | StoreError::ItemNotFound { .. }
        )
    }

    /// Get the table this error refers to
    pub fn table(&self) -> &str {
        match self {
            StoreError::ConditionFailed { table, .. }
            | StoreError::TableNotFound { table }
            | StoreError::ItemNotFound { table }
            | StoreError::Backend { table, .. } => table,
        }
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
