//! Chrome Policy Library
//!
//! Machine-wide Google Chrome hardening policies.
//! The table lives in `policy.toml` and is embedded at build time.
//!
//! # Usage as Binary
//!
//! Run elevated: `chrome-policy`
//!
//! Preview without touching the registry: `chrome-policy --dry-run`

use hardening_common::{PolicyResult, PolicyTable};

/// Registry key Chrome reads machine policies from
pub const CHROME_POLICY_KEY: &str = r"SOFTWARE\Policies\Google\Chrome";

/// The embedded policy table
pub const POLICY_TABLE: &str = include_str!("../policy.toml");

pub fn policy_table() -> PolicyResult<PolicyTable> {
    PolicyTable::parse(POLICY_TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hardening_common::{
        apply_table, MemoryStore, MissingKey, PolicyStore, PolicyValue, TargetOutcome,
    };

    #[test]
    fn test_table_parses_with_supported_types_only() {
        let table = policy_table().unwrap();
        assert!(table.unsupported_entries().is_empty());
    }

    #[test]
    fn test_chrome_key_is_created_when_missing() {
        let table = policy_table().unwrap();
        let target = table.target(CHROME_POLICY_KEY).unwrap();
        assert_eq!(table.keys.len(), 1);
        assert_eq!(target.when_missing, MissingKey::Create);
        assert_eq!(target.values.len(), 65);
    }

    #[test]
    fn test_download_location_overrides_are_removed() {
        let table = policy_table().unwrap();
        let target = table.target(CHROME_POLICY_KEY).unwrap();
        assert!(target.remove.iter().any(|n| n == "DownloadDirectory"));
        assert!(target.remove.iter().any(|n| n == "PromptForDownloadLocation"));
    }

    #[test]
    fn test_selected_values() {
        let table = policy_table().unwrap();
        let values = &table.target(CHROME_POLICY_KEY).unwrap().values;
        assert_eq!(values["DownloadRestrictions"], PolicyValue::Dword(4));
        assert_eq!(values["DiskCacheSize"], PolicyValue::Dword(250_609_664));
        assert_eq!(
            values["AuthSchemes"],
            PolicyValue::String(r#"["ntlm", "negotiate"]"#.to_string())
        );
        assert_eq!(values["HSTSPolicyBypassList"], PolicyValue::String(String::new()));
    }

    #[test]
    fn test_apply_overwrites_and_removes_download_directory() {
        let table = policy_table().unwrap();
        let mut store = MemoryStore::new().with_value(
            CHROME_POLICY_KEY,
            "DownloadDirectory",
            PolicyValue::String(r"\\share\downloads".to_string()),
        );

        let reports = apply_table(&mut store, &table).unwrap();

        assert_eq!(reports[0].outcome, TargetOutcome::Applied);
        assert_eq!(reports[0].written, 65);
        assert_eq!(reports[0].removed, vec!["DownloadDirectory".to_string()]);
        assert!(store.key_exists(CHROME_POLICY_KEY));
        assert!(store.value(CHROME_POLICY_KEY, "DownloadDirectory").is_none());
    }
}
