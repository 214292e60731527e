//! Uptime collection

use std::time::Duration;

use thiserror::Error;

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Error)]
pub enum UptimeError {
    #[error("system uptime is unavailable: {0}")]
    Unavailable(String),
}

/// Elapsed time since boot, read once per invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UptimeSample(Duration);

impl UptimeSample {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn from_days(days: u64) -> Self {
        Self::from_millis(days.saturating_mul(MILLIS_PER_DAY))
    }

    /// Whole days of uptime, rounded down
    pub fn days(&self) -> u64 {
        self.0.as_secs() / (24 * 60 * 60)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Human-readable uptime (e.g., "2 days, 5 hours, 30 minutes")
    pub fn human(&self) -> String {
        format_uptime(self.0.as_secs())
    }
}

/// Source of the uptime sample
pub trait UptimeReader {
    fn read(&self) -> Result<UptimeSample, UptimeError>;
}

/// Reads the host's milliseconds-since-boot counter
#[derive(Debug, Clone, Copy, Default)]
pub struct HostUptime;

impl UptimeReader for HostUptime {
    fn read(&self) -> Result<UptimeSample, UptimeError> {
        match millis_since_boot() {
            0 => Err(UptimeError::Unavailable(
                "boot tick counter returned zero".to_string(),
            )),
            millis => Ok(UptimeSample::from_millis(millis)),
        }
    }
}

#[cfg(windows)]
fn millis_since_boot() -> u64 {
    // SAFETY: GetTickCount64 takes no arguments and cannot fail.
    unsafe { windows_sys::Win32::System::SystemInformation::GetTickCount64() }
}

#[cfg(not(windows))]
fn millis_since_boot() -> u64 {
    sysinfo::System::uptime().saturating_mul(1000)
}

/// Format uptime seconds into human-readable string
fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{} day{}", days, if days == 1 { "" } else { "s" }));
    }
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours == 1 { "" } else { "s" }));
    }
    if minutes > 0 {
        parts.push(format!(
            "{} minute{}",
            minutes,
            if minutes == 1 { "" } else { "s" }
        ));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{} second{}", secs, if secs == 1 { "" } else { "s" }));
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_round_down() {
        assert_eq!(UptimeSample::from_millis(MILLIS_PER_DAY - 1).days(), 0);
        assert_eq!(UptimeSample::from_millis(MILLIS_PER_DAY).days(), 1);
        assert_eq!(UptimeSample::from_millis(45 * MILLIS_PER_DAY + 3_600_000).days(), 45);
    }

    #[test]
    fn test_from_days_saturates() {
        assert_eq!(UptimeSample::from_days(60).days(), 60);
        assert!(UptimeSample::from_days(u64::MAX).days() > 0);
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0 seconds");
        assert_eq!(format_uptime(61), "1 minute, 1 second");
        assert_eq!(format_uptime(2 * 86400 + 5 * 3600 + 30 * 60), "2 days, 5 hours, 30 minutes");
    }

    #[test]
    fn test_host_uptime_is_readable() {
        let sample = HostUptime.read().unwrap();
        assert!(sample.as_duration() > Duration::ZERO);
    }
}
