//! Before-value bookkeeping for dirty tracking.

use std::collections::BTreeMap;

use crate::value::Value;

/// The set of original values recorded since the last persistence point.
///
/// The first write to an attribute records the value it had at that moment;
/// later writes to the same attribute keep the original before-value. A
/// recorded `Value::Null` means the attribute was absent.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    original: BTreeMap<String, Value>,
}

impl ChangeSet {
    /// An empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the before-value for an attribute, keeping any earlier record.
    pub fn record(&mut self, name: &str, before: Value) {
        self.original.entry(name.to_string()).or_insert(before);
    }

    /// The recorded before-value for an attribute, if any write touched it.
    pub fn before(&self, name: &str) -> Option<&Value> {
        self.original.get(name)
    }

    /// All tracked attributes with their before-values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.original.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when no writes have been recorded.
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Forget all recorded before-values.
    pub fn clear(&mut self) {
        self.original.clear();
    }
}
