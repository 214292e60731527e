//! Edge Policy Library
//!
//! Machine-wide Microsoft Edge and EdgeUpdate hardening policies.
//! Both keys are only written when they already exist.

use hardening_common::{PolicyResult, PolicyTable};

pub const EDGE_POLICY_KEY: &str = r"SOFTWARE\Policies\Microsoft\Edge";
pub const EDGE_UPDATE_POLICY_KEY: &str = r"SOFTWARE\Policies\Microsoft\EdgeUpdate";

/// The embedded policy table
pub const POLICY_TABLE: &str = include_str!("../policy.toml");

pub fn policy_table() -> PolicyResult<PolicyTable> {
    PolicyTable::parse(POLICY_TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hardening_common::{apply_table, MemoryStore, MissingKey, PolicyValue, TargetOutcome};

    #[test]
    fn test_table_parses_with_supported_types_only() {
        let table = policy_table().unwrap();
        assert!(table.unsupported_entries().is_empty());
    }

    #[test]
    fn test_edge_keys_are_never_created() {
        let table = policy_table().unwrap();
        let paths: Vec<&str> = table.keys.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, vec![EDGE_POLICY_KEY, EDGE_UPDATE_POLICY_KEY]);
        assert!(table.keys.iter().all(|t| t.when_missing == MissingKey::Skip));
    }

    #[test]
    fn test_selected_values() {
        let table = policy_table().unwrap();
        let edge = &table.target(EDGE_POLICY_KEY).unwrap().values;
        assert_eq!(edge.len(), 75);
        assert_eq!(edge["SmartScreenEnabled"], PolicyValue::Dword(1));
        assert_eq!(edge["DiskCacheSize"], PolicyValue::Dword(250_000_000));
        assert_eq!(
            edge["WebRtcLocalhostIpHandling"],
            PolicyValue::String("default_public_interface_only".to_string())
        );

        let update = &table.target(EDGE_UPDATE_POLICY_KEY).unwrap().values;
        assert_eq!(update["UpdateDefault"], PolicyValue::Dword(1));
    }

    #[test]
    fn test_missing_edge_is_skipped_but_update_is_applied() {
        let table = policy_table().unwrap();
        let mut store = MemoryStore::new().with_key(EDGE_UPDATE_POLICY_KEY);

        let reports = apply_table(&mut store, &table).unwrap();

        assert_eq!(reports[0].outcome, TargetOutcome::Skipped);
        assert_eq!(reports[1].outcome, TargetOutcome::Applied);
        assert!(store.values(EDGE_POLICY_KEY).is_none());
        assert_eq!(
            store.value(EDGE_UPDATE_POLICY_KEY, "UpdateDefault"),
            Some(&PolicyValue::Dword(1))
        );
    }

    #[test]
    fn test_write_failure_aborts_before_edge_update() {
        let table = policy_table().unwrap();
        let mut store = MemoryStore::new()
            .with_key(EDGE_POLICY_KEY)
            .with_key(EDGE_UPDATE_POLICY_KEY)
            .fail_writes_to("SmartScreenEnabled");

        assert!(apply_table(&mut store, &table).is_err());
        assert!(store.value(EDGE_UPDATE_POLICY_KEY, "UpdateDefault").is_none());
    }
}
