//! Data-driven policy tables
//!
//! Each policy tool embeds a TOML table describing the keys it manages:
//!
//! ```toml
//! [[key]]
//! path = 'SOFTWARE\Policies\Google\Chrome'
//! when_missing = "create"
//! remove = ["DownloadDirectory"]
//!
//! [key.values]
//! SitePerProcess = 1
//! HSTSPolicyBypassList = ""
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::PolicyResult;
use crate::store::PolicyValue;

/// What to do when a target key does not exist yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKey {
    /// Log and leave the key alone (the browser is presumably not installed)
    #[default]
    Skip,
    /// Create the key, then write the values
    Create,
}

/// One key path and the values enforced under it
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyTarget {
    pub path: String,
    #[serde(default)]
    pub when_missing: MissingKey,
    #[serde(default)]
    pub values: BTreeMap<String, PolicyValue>,
    /// Values deleted after the writes, if present
    #[serde(default)]
    pub remove: Vec<String>,
}

/// A full policy table: every key a tool manages, in application order
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyTable {
    #[serde(rename = "key", default)]
    pub keys: Vec<PolicyTarget>,
}

impl PolicyTable {
    pub fn parse(source: &str) -> PolicyResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// `(key path, value name)` of every entry whose type the store cannot write
    pub fn unsupported_entries(&self) -> Vec<(&str, &str)> {
        self.keys
            .iter()
            .flat_map(|target| {
                target
                    .values
                    .iter()
                    .filter(|(_, value)| !value.is_supported())
                    .map(move |(name, _)| (target.path.as_str(), name.as_str()))
            })
            .collect()
    }

    pub fn target(&self, path: &str) -> Option<&PolicyTarget> {
        self.keys.iter().find(|target| target.path == path)
    }
}
