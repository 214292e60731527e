//! In-memory policy store used for dry runs and tests

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use serde::Serialize;

use crate::error::{PolicyError, PolicyResult};
use crate::store::{PolicyStore, PolicyValue};

/// A policy store backed by nested ordered maps
///
/// Serializes as `{ "<key path>": { "<value name>": <value> } }`, which is
/// what `--dry-run` prints.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MemoryStore {
    keys: BTreeMap<String, BTreeMap<String, PolicyValue>>,
    #[serde(skip)]
    failing: BTreeSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create a key path
    pub fn with_key(mut self, path: &str) -> Self {
        self.keys.entry(path.to_string()).or_default();
        self
    }

    /// Pre-seed a value, creating its key if needed
    pub fn with_value(mut self, path: &str, name: &str, value: PolicyValue) -> Self {
        self.keys
            .entry(path.to_string())
            .or_default()
            .insert(name.to_string(), value);
        self
    }

    /// Make every write to the named value fail with an access error
    pub fn fail_writes_to(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn value(&self, path: &str, name: &str) -> Option<&PolicyValue> {
        self.keys.get(path).and_then(|values| values.get(name))
    }

    pub fn values(&self, path: &str) -> Option<&BTreeMap<String, PolicyValue>> {
        self.keys.get(path)
    }

    fn key_mut(&mut self, path: &str) -> PolicyResult<&mut BTreeMap<String, PolicyValue>> {
        self.keys.get_mut(path).ok_or_else(|| PolicyError::OpenKey {
            path: path.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "key does not exist"),
        })
    }

    fn write(&mut self, path: &str, name: &str, value: PolicyValue) -> PolicyResult<()> {
        if self.failing.contains(name) {
            return Err(PolicyError::SetValue {
                name: name.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "access is denied"),
            });
        }
        self.key_mut(path)?.insert(name.to_string(), value);
        Ok(())
    }
}

impl PolicyStore for MemoryStore {
    fn key_exists(&self, path: &str) -> bool {
        self.keys.contains_key(path)
    }

    fn create_key(&mut self, path: &str) -> PolicyResult<()> {
        self.keys.entry(path.to_string()).or_default();
        Ok(())
    }

    fn set_dword(&mut self, path: &str, name: &str, value: u32) -> PolicyResult<()> {
        self.write(path, name, PolicyValue::Dword(value))
    }

    fn set_string(&mut self, path: &str, name: &str, value: &str) -> PolicyResult<()> {
        self.write(path, name, PolicyValue::String(value.to_string()))
    }

    fn value_exists(&self, path: &str, name: &str) -> PolicyResult<bool> {
        match self.keys.get(path) {
            Some(values) => Ok(values.contains_key(name)),
            None => Err(PolicyError::OpenKey {
                path: path.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "key does not exist"),
            }),
        }
    }

    fn remove_value(&mut self, path: &str, name: &str) -> PolicyResult<()> {
        if self.failing.contains(name) {
            return Err(PolicyError::DeleteValue {
                name: name.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "access is denied"),
            });
        }
        self.key_mut(path)?.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_key_is_idempotent() {
        let mut store = MemoryStore::new();
        store.create_key("A").unwrap();
        store.set_dword("A", "x", 1).unwrap();
        store.create_key("A").unwrap();
        assert_eq!(store.value("A", "x"), Some(&PolicyValue::Dword(1)));
    }

    #[test]
    fn test_serializes_as_nested_map() {
        let mut store = MemoryStore::new().with_key("A");
        store.set_string("A", "name", "value").unwrap();
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json, serde_json::json!({ "A": { "name": "value" } }));
    }
}
