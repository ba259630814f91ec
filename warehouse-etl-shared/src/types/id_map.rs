use std::collections::HashMap;

use crate::types::Value;

/// A hashable source identifier.
///
/// Source primary keys are opaque text or integers depending on the table;
/// `SourceKey` is the subset of [`Value`] that can key an [`IdMap`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    Text(String),
    Int(i64),
}

impl SourceKey {
    /// Extracts a key from a cell. Floats, booleans, timestamps and nulls
    /// cannot identify a source row.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(SourceKey::Text(s.clone())),
            Value::Int(i) => Some(SourceKey::Int(*i)),
            _ => None,
        }
    }
}

/// Source identifier → surrogate id index for one dimension.
///
/// Built by the dimension transform immediately after surrogate assignment
/// and consumed only by the fact transform within the same run. Never
/// persisted; surrogate ids are stable for the duration of one run only.
#[derive(Debug, Default, Clone)]
pub struct IdMap {
    inner: HashMap<SourceKey, i64>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: SourceKey, surrogate: i64) {
        self.inner.insert(source, surrogate);
    }

    /// Resolves a raw cell to its surrogate id, or `None` when the cell is
    /// not a key or the source row was never seen.
    pub fn resolve(&self, value: &Value) -> Option<i64> {
        let key = SourceKey::from_value(value)?;
        self.inner.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
