//! Chrome Policy
//!
//! Writes the machine-wide Chrome hardening policies to
//! `HKLM\SOFTWARE\Policies\Google\Chrome`, creating the key if needed.

hardening_common::policy_main!(chrome_policy::POLICY_TABLE, "chrome_policy", "Google Chrome");
