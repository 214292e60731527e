//! Uptime Guard
//!
//! Reads system uptime once and escalates on long-running machines:
//!
//! - below the warning threshold nothing happens
//! - between warning and critical the user gets a restart reminder
//! - at or above critical a per-minute countdown runs, then the configured
//!   restart command is executed
//!
//! Every collaborator sits behind a trait ([`UptimeReader`], [`Notifier`],
//! [`Ticker`], [`RestartInvoker`]) so the controller can be driven without a
//! clock, a desktop session or the power to reboot.

pub mod config;
pub mod error;
pub mod escalation;
pub mod notifier;
pub mod restart;
pub mod ticker;
pub mod uptime;

pub use config::{CommandLine, ConfigError, GuardConfig, RestartConfig, Thresholds};
pub use error::{Boundary, FailurePolicy, GuardError};
pub use escalation::{decide, Countdown, Decision, EscalationController, Outcome, Report};
pub use notifier::{DesktopNotifier, Notice, NoticeAction, Notifier, NotifyError};
pub use restart::{CommandRestarter, RestartError, RestartInvoker};
pub use ticker::{Ticker, TokioTicker, TICK};
pub use uptime::{HostUptime, UptimeError, UptimeReader, UptimeSample};
