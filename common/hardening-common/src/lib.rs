//! Hardening Common - Shared utilities for the hardening tools
//!
//! This crate provides functionality used across the workspace binaries:
//!
//! - **Initialization**: [`init_tracing`] and the `policy_main!` macro
//! - **Policy store**: the [`PolicyStore`] trait over "set or delete a named
//!   value under a key path", with a Windows registry backend and an
//!   in-memory backend for dry runs and tests
//! - **Policy tables**: data-driven key/value tables embedded in each tool
//! - **Errors**: [`PolicyError`] for everything the store and tables can fail on
//!
//! # Example
//!
//! ```rust,ignore
//! // In main.rs of a policy tool
//! hardening_common::policy_main!(my_policy::POLICY_TABLE, "my_policy", "My Browser");
//! ```

pub mod apply;
pub mod error;
pub mod init;
pub mod memory;
#[cfg(windows)]
pub mod registry;
pub mod store;
pub mod table;

// Re-export commonly used items at crate root
pub use apply::{apply_table, apply_target, run_policy_cli, ApplyReport, PolicyCli, TargetOutcome};
pub use error::{PolicyError, PolicyResult};
pub use init::init_tracing;
pub use memory::MemoryStore;
#[cfg(windows)]
pub use registry::RegistryStore;
pub use store::{PolicyStore, PolicyValue};
pub use table::{MissingKey, PolicyTable, PolicyTarget};
