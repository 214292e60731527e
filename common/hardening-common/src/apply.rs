//! Applying a policy table to a store, and the shared policy tool CLI

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use crate::error::PolicyResult;
use crate::memory::MemoryStore;
use crate::store::PolicyStore;
use crate::table::{MissingKey, PolicyTable, PolicyTarget};

/// What happened to one target key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    /// Key existed and the values were written
    Applied,
    /// Key was missing, got created, and the values were written
    Created,
    /// Key was missing and the table says to leave it alone
    Skipped,
}

/// Per-key summary of an apply run
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub path: String,
    pub outcome: TargetOutcome,
    pub written: usize,
    pub removed: Vec<String>,
}

/// Apply a single target.
///
/// Key creation and value writes are fatal on failure. Removals are best
/// effort: a failed delete is logged and the run continues.
pub fn apply_target<S>(store: &mut S, target: &PolicyTarget) -> PolicyResult<ApplyReport>
where
    S: PolicyStore + ?Sized,
{
    let path = target.path.as_str();
    let mut outcome = TargetOutcome::Applied;

    if !store.key_exists(path) {
        match target.when_missing {
            MissingKey::Skip => {
                tracing::info!(key = %path, "registry key not found, skipping");
                return Ok(ApplyReport {
                    path: path.to_string(),
                    outcome: TargetOutcome::Skipped,
                    written: 0,
                    removed: Vec::new(),
                });
            }
            MissingKey::Create => {
                tracing::info!(key = %path, "registry key not found, creating key");
                store.create_key(path)?;
                outcome = TargetOutcome::Created;
            }
        }
    }

    let written = store.set_values(path, &target.values)?;

    let mut removed = Vec::new();
    for name in &target.remove {
        match store.delete_value(path, name) {
            Ok(true) => removed.push(name.clone()),
            Ok(false) => {}
            Err(e) => tracing::warn!(key = %path, error = %e, "error deleting registry value"),
        }
    }

    tracing::info!(key = %path, written, removed = removed.len(), "registry key updated");
    Ok(ApplyReport {
        path: path.to_string(),
        outcome,
        written,
        removed,
    })
}

/// Apply every target of a table in order, stopping at the first fatal error
pub fn apply_table<S>(store: &mut S, table: &PolicyTable) -> PolicyResult<Vec<ApplyReport>>
where
    S: PolicyStore + ?Sized,
{
    table
        .keys
        .iter()
        .map(|target| apply_target(store, target))
        .collect()
}

/// Command-line flags shared by the policy tools
#[derive(Debug, Parser)]
#[command(version, about = "Enforce browser hardening policies in the registry")]
pub struct PolicyCli {
    /// Apply to an in-memory store and print the resulting state instead of
    /// touching the registry
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, start from a store where none of the keys exist
    #[arg(long, requires = "dry_run")]
    pub from_empty: bool,
}

impl PolicyCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Serialize)]
struct DryRun<'a> {
    browser: &'a str,
    reports: Vec<ApplyReport>,
    state: MemoryStore,
}

/// Entry point behind `policy_main!`
pub fn run_policy_cli(cli: &PolicyCli, browser: &str, table_source: &str) -> anyhow::Result<()> {
    let table = PolicyTable::parse(table_source).context("failed to load policy table")?;

    for (path, name) in table.unsupported_entries() {
        tracing::warn!(key = %path, value = %name, "policy table entry has an unsupported type");
    }

    if cli.dry_run {
        let mut store = table
            .keys
            .iter()
            .filter(|_| !cli.from_empty)
            .fold(MemoryStore::new(), |store, target| store.with_key(&target.path));

        let reports = apply_table(&mut store, &table)?;
        let dump = DryRun {
            browser,
            reports,
            state: store,
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    apply_to_system(&table).with_context(|| format!("error setting {browser} registry keys"))?;
    tracing::info!("Registry updates for {} complete", browser);
    Ok(())
}

#[cfg(windows)]
fn apply_to_system(table: &PolicyTable) -> PolicyResult<Vec<ApplyReport>> {
    let mut store = crate::registry::RegistryStore::local_machine();
    apply_table(&mut store, table)
}

#[cfg(not(windows))]
fn apply_to_system(_table: &PolicyTable) -> PolicyResult<Vec<ApplyReport>> {
    Err(crate::error::PolicyError::UnsupportedPlatform)
}
