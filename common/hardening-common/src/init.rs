//! Tool initialization utilities
//!
//! Provides standardized tracing setup and the `policy_main!` macro
//! for consistent startup across the policy tools.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for a hardening tool
///
/// Sets up logging to stderr (stdout carries dry-run and check output) with:
/// - Formatted output without ANSI colors (scheduled tasks capture raw text)
/// - Environment-based filtering via RUST_LOG
/// - Default log level of `info` for the specified crate
///
/// Set `LOG_FORMAT=json` for structured JSON output.
/// Default is human-readable text output.
///
/// # Arguments
///
/// * `crate_name` - The name of the tool crate (e.g., "uptime_guard")
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("{}=info", crate_name).parse()?)
        .add_directive("hardening_common=info".parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

/// Macro for a standard policy tool `main`
///
/// Expands to a `fn main()` that initializes tracing, parses the shared
/// [`PolicyCli`](crate::PolicyCli) flags and applies the embedded table.
///
/// # Arguments
///
/// * `$table` - The embedded TOML policy table
/// * `$crate_name` - String literal for the crate name (used in logging)
/// * `$browser` - Human-readable browser name for log lines
///
/// # Example
///
/// ```rust,ignore
/// hardening_common::policy_main!(chrome_policy::POLICY_TABLE, "chrome_policy", "Google Chrome");
/// ```
#[macro_export]
macro_rules! policy_main {
    ($table:expr, $crate_name:expr, $browser:expr) => {
        fn main() -> anyhow::Result<()> {
            $crate::init_tracing($crate_name)?;

            let cli = $crate::PolicyCli::parse_args();
            $crate::run_policy_cli(&cli, $browser, $table)
        }
    };
}
