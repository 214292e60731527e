//! The policy store abstraction
//!
//! A policy store is anything that can hold named values under a key path:
//! the Windows registry in production, a `BTreeMap` in dry runs and tests.
//! Backends implement the primitive operations; the batch semantics live in
//! the provided methods so every backend behaves the same way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PolicyResult;

/// A single policy value as written to the store
///
/// Tables may contain TOML values that have no registry representation
/// (floats, booleans, negative numbers, arrays). Those are kept as
/// [`PolicyValue::Unsupported`] so the writer can skip them with a log line
/// instead of rejecting the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyValue {
    /// REG_DWORD
    Dword(u32),
    /// REG_SZ
    String(String),
    /// Anything else found in a table
    Unsupported(toml::Value),
}

impl PolicyValue {
    /// Short type name used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            PolicyValue::Dword(_) => "dword",
            PolicyValue::String(_) => "string",
            PolicyValue::Unsupported(raw) => raw.type_str(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, PolicyValue::Unsupported(_))
    }
}

impl From<u32> for PolicyValue {
    fn from(value: u32) -> Self {
        PolicyValue::Dword(value)
    }
}

impl From<&str> for PolicyValue {
    fn from(value: &str) -> Self {
        PolicyValue::String(value.to_string())
    }
}

/// Get/set/delete of named values under a key path
pub trait PolicyStore {
    /// Whether the key path exists
    fn key_exists(&self, path: &str) -> bool;

    /// Create the key path (no-op if it already exists)
    fn create_key(&mut self, path: &str) -> PolicyResult<()>;

    /// Write a 32-bit value under an existing key
    fn set_dword(&mut self, path: &str, name: &str, value: u32) -> PolicyResult<()>;

    /// Write a string value under an existing key
    fn set_string(&mut self, path: &str, name: &str, value: &str) -> PolicyResult<()>;

    /// Whether a named value exists under the key
    fn value_exists(&self, path: &str, name: &str) -> PolicyResult<bool>;

    /// Remove a named value that is known to exist
    fn remove_value(&mut self, path: &str, name: &str) -> PolicyResult<()>;

    /// Apply every entry of `values` under `path`.
    ///
    /// Unsupported value types are logged and skipped. The first write error
    /// aborts the call. Returns the number of values written.
    fn set_values(
        &mut self,
        path: &str,
        values: &BTreeMap<String, PolicyValue>,
    ) -> PolicyResult<usize> {
        let mut written = 0;
        for (name, value) in values {
            match value {
                PolicyValue::Dword(v) => self.set_dword(path, name, *v)?,
                PolicyValue::String(v) => self.set_string(path, name, v)?,
                PolicyValue::Unsupported(_) => {
                    tracing::warn!(
                        key = %path,
                        value = %name,
                        kind = value.kind(),
                        "unsupported type for policy value, skipping"
                    );
                    continue;
                }
            }
            tracing::debug!(key = %path, value = %name, kind = value.kind(), "policy value set");
            written += 1;
        }
        Ok(written)
    }

    /// Delete a named value, succeeding as a no-op when it is already absent.
    ///
    /// Returns `true` when a value was actually removed.
    fn delete_value(&mut self, path: &str, name: &str) -> PolicyResult<bool> {
        if !self.value_exists(path, name)? {
            tracing::info!(key = %path, value = %name, "registry value does not exist, skipping deletion");
            return Ok(false);
        }
        self.remove_value(path, name)?;
        Ok(true)
    }
}
