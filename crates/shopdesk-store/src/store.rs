//! Row store contract and the in-memory implementation.

use std::collections::{BTreeMap, HashMap};

use serde::{de::DeserializeOwned, Serialize};

use crate::StoreError;

/// A generic scoped row store.
///
/// Rows are serializable records keyed by id within a scope (one scope per
/// owning entity, e.g. a product). The engine only ever replays snapshots
/// through this surface; querying stays on the platform side.
pub trait RowStore {
    /// Insert or replace a row.
    fn upsert<T: Serialize>(&mut self, scope: &str, id: &str, row: &T) -> Result<(), StoreError>;

    /// Fetch a single row by id, or `None` if absent.
    fn get<T: DeserializeOwned>(&self, scope: &str, id: &str) -> Result<Option<T>, StoreError>;

    /// Delete a row by id. Returns whether a row was removed.
    fn delete(&mut self, scope: &str, id: &str) -> Result<bool, StoreError>;

    /// Load every row in a scope, ordered by id.
    fn load_scope<T: DeserializeOwned>(&self, scope: &str) -> Result<Vec<T>, StoreError>;

    /// Remove every row in a scope.
    fn clear_scope(&mut self, scope: &str) -> Result<(), StoreError>;
}

/// HashMap-backed store for tests and local development.
///
/// Rows are kept as JSON values so the store stays agnostic of the record
/// types it holds, the same shape the platform backend exposes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scopes: HashMap<String, BTreeMap<String, serde_json::Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in a scope.
    pub fn scope_len(&self, scope: &str) -> usize {
        self.scopes.get(scope).map(|rows| rows.len()).unwrap_or(0)
    }
}

impl RowStore for MemoryStore {
    fn upsert<T: Serialize>(&mut self, scope: &str, id: &str, row: &T) -> Result<(), StoreError> {
        let value =
            serde_json::to_value(row).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .insert(id.to_string(), value);
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, scope: &str, id: &str) -> Result<Option<T>, StoreError> {
        match self.scopes.get(scope).and_then(|rows| rows.get(id)) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    fn delete(&mut self, scope: &str, id: &str) -> Result<bool, StoreError> {
        Ok(self
            .scopes
            .get_mut(scope)
            .map(|rows| rows.remove(id).is_some())
            .unwrap_or(false))
    }

    fn load_scope<T: DeserializeOwned>(&self, scope: &str) -> Result<Vec<T>, StoreError> {
        let Some(rows) = self.scopes.get(scope) else {
            return Ok(Vec::new());
        };
        rows.values()
            .map(|value| serde_json::from_value(value.clone()).map_err(StoreError::from))
            .collect()
    }

    fn clear_scope(&mut self, scope: &str) -> Result<(), StoreError> {
        self.scopes.remove(scope);
        Ok(())
    }
}
