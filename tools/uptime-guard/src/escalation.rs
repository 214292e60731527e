//! Escalation controller
//!
//! Turns one uptime sample into exactly one action:
//!
//! ```text
//! Idle ─┬─> None           (uptime < warning)
//!       ├─> Advisory       (warning <= uptime < critical)
//!       └─> Counting(n) ──> Counting(n-1) ──> ... ──> Restarting
//! ```
//!
//! Once counting starts there is no way back; killing the process is the
//! only way to stop a forced restart.

use serde::Serialize;

use crate::config::{GuardConfig, Thresholds};
use crate::error::{Boundary, FailurePolicy, GuardError};
use crate::notifier::{Notice, Notifier};
use crate::restart::RestartInvoker;
use crate::ticker::{Ticker, TICK};
use crate::uptime::{UptimeReader, UptimeSample};

/// The action an uptime sample calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    None,
    Advisory,
    ForcedRestart,
}

/// Map whole days of uptime onto a decision.
///
/// The critical comparison runs first, so with inverted thresholds the
/// forced restart wins from the critical threshold upwards.
pub fn decide(uptime_days: u64, thresholds: &Thresholds) -> Decision {
    if uptime_days >= thresholds.critical_days {
        Decision::ForcedRestart
    } else if uptime_days >= thresholds.warning_days {
        Decision::Advisory
    } else {
        Decision::None
    }
}

/// Forced-restart countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// `remaining` notifications (and minutes) left before the restart
    Counting { remaining: u32 },
    Restarting,
}

impl Countdown {
    pub fn start(minutes: u32) -> Self {
        match minutes {
            0 => Countdown::Restarting,
            remaining => Countdown::Counting { remaining },
        }
    }

    /// State after one elapsed minute
    pub fn advance(self) -> Self {
        match self {
            Countdown::Counting { remaining } if remaining > 1 => Countdown::Counting {
                remaining: remaining - 1,
            },
            _ => Countdown::Restarting,
        }
    }
}

/// What a run ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Idle,
    Advised,
    /// Restart command ran and exited successfully
    Restarted { output: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub uptime: UptimeSample,
    pub decision: Decision,
    pub outcome: Outcome,
}

/// Drives one escalation run against its collaborators
pub struct EscalationController<U, N, T, R> {
    config: GuardConfig,
    uptime: U,
    notifier: N,
    ticker: T,
    restarter: R,
}

impl<U, N, T, R> EscalationController<U, N, T, R>
where
    U: UptimeReader,
    N: Notifier,
    T: Ticker,
    R: RestartInvoker,
{
    pub fn new(config: GuardConfig, uptime: U, notifier: N, ticker: T, restarter: R) -> Self {
        Self {
            config,
            uptime,
            notifier,
            ticker,
            restarter,
        }
    }

    /// Read uptime once and carry out whatever it calls for
    pub async fn run(&self) -> Result<Report, GuardError> {
        let uptime = self.uptime.read()?;
        let days = uptime.days();
        println!("System uptime: {} days", days);
        tracing::info!(days, "System uptime: {} days", days);

        let thresholds = self.config.thresholds;
        let decision = decide(days, &thresholds);
        let outcome = match decision {
            Decision::None => {
                tracing::info!(
                    "Uptime is less than {} days, doing nothing",
                    thresholds.warning_days
                );
                Outcome::Idle
            }
            Decision::Advisory => {
                tracing::info!(
                    "Uptime is between warning and critical thresholds, offering to restart"
                );
                self.run_advisory()?;
                Outcome::Advised
            }
            Decision::ForcedRestart => {
                tracing::info!(
                    "Uptime is at or above critical threshold, starting countdown and forcing restart"
                );
                self.run_forced_restart().await?
            }
        };

        Ok(Report {
            uptime,
            decision,
            outcome,
        })
    }

    /// Show the restart reminder once. Does not wait for an answer.
    pub fn run_advisory(&self) -> Result<(), GuardError> {
        self.notify(&Notice::advisory(self.config.thresholds.warning_days))
    }

    /// Count down one notification per minute, then run the restart command
    pub async fn run_forced_restart(&self) -> Result<Outcome, GuardError> {
        let critical_days = self.config.thresholds.critical_days;
        let mut state = Countdown::start(self.config.restart.countdown_minutes);

        while let Countdown::Counting { remaining } = state {
            let notice = Notice::countdown(critical_days, remaining);
            tracing::info!(remaining, "{}", notice.message);
            self.notify(&notice)?;

            state = state.advance();
            self.ticker.wait(TICK).await;
        }

        let command = &self.config.restart.command;
        tracing::info!(command = %command, "running restart command");
        let output = self.restarter.execute(command).await?;
        tracing::info!(output = %output.trim(), "Restart command executed successfully");

        Ok(Outcome::Restarted { output })
    }

    fn notify(&self, notice: &Notice) -> Result<(), GuardError> {
        let Err(err) = self.notifier.show(notice) else {
            return Ok(());
        };
        match Boundary::Notifier.on_failure() {
            FailurePolicy::Tolerate => {
                tracing::warn!(error = %err, title = %notice.title, "notification not shown");
                Ok(())
            }
            FailurePolicy::Abort => Err(err.into()),
        }
    }
}
