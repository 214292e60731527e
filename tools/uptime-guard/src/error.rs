//! Run-level errors and the failure policy per collaborator

use thiserror::Error;

use crate::config::ConfigError;
use crate::notifier::NotifyError;
use crate::restart::RestartError;
use crate::uptime::UptimeError;

/// The external collaborators a run talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Config,
    Uptime,
    Notifier,
    Restart,
}

/// What a failure at a boundary does to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log and carry on
    Tolerate,
    /// Stop the run and exit non-zero
    Abort,
}

impl Boundary {
    /// A broken notification layer must never stop a forced restart.
    /// Everything else is fatal.
    pub const fn on_failure(self) -> FailurePolicy {
        match self {
            Boundary::Notifier => FailurePolicy::Tolerate,
            Boundary::Config | Boundary::Uptime | Boundary::Restart => FailurePolicy::Abort,
        }
    }
}

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("error loading configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("error getting system uptime: {0}")]
    Uptime(#[from] UptimeError),

    #[error("{0}")]
    Notify(#[from] NotifyError),

    #[error("failed to restart the system: {0}")]
    Restart(#[from] RestartError),
}

impl GuardError {
    pub const fn boundary(&self) -> Boundary {
        match self {
            GuardError::Config(_) => Boundary::Config,
            GuardError::Uptime(_) => Boundary::Uptime,
            GuardError::Notify(_) => Boundary::Notifier,
            GuardError::Restart(_) => Boundary::Restart,
        }
    }

    /// Process exit status; distinct per boundary so a scheduler can tell a
    /// missed forced restart from a bad config
    pub const fn exit_code(&self) -> u8 {
        match self.boundary() {
            Boundary::Config => 2,
            Boundary::Uptime => 3,
            Boundary::Notifier => 4,
            Boundary::Restart => 5,
        }
    }
}
