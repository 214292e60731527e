//! Edge Policy
//!
//! Writes the machine-wide Edge and EdgeUpdate hardening policies. Keys that
//! do not exist yet are left alone.

hardening_common::policy_main!(edge_policy::POLICY_TABLE, "edge_policy", "Microsoft Edge");
