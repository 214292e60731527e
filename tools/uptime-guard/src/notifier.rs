//! User-facing notifications

use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to push notification: {0}")]
pub struct NotifyError(pub String);

/// A selectable action attached to a notification. Labels are advisory; the
/// guard never waits for or reads the user's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeAction {
    pub label: String,
    pub argument: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub app_name: String,
    pub title: String,
    pub message: String,
    pub actions: Vec<NoticeAction>,
}

impl Notice {
    /// Reminder shown between the warning and critical thresholds
    pub fn advisory(warning_days: u64) -> Self {
        Self {
            app_name: "System Reminder".to_string(),
            title: "System Uptime Warning".to_string(),
            message: format!(
                "Your system has been up for over {} days. Would you like to restart now or later?",
                warning_days
            ),
            actions: vec![
                NoticeAction {
                    label: "Later".to_string(),
                    argument: "later".to_string(),
                },
                NoticeAction {
                    label: "Restart Now".to_string(),
                    argument: "restart".to_string(),
                },
            ],
        }
    }

    /// One tick of the forced-restart countdown
    pub fn countdown(critical_days: u64, remaining_minutes: u32) -> Self {
        Self {
            app_name: "Restart Notification".to_string(),
            title: "Restart Notification - Urgent".to_string(),
            message: format!(
                "Your system has been running for over {} days. It will restart in {} minutes.",
                critical_days, remaining_minutes
            ),
            actions: Vec::new(),
        }
    }
}

/// Displays a notice to the interactive user
///
/// `Ok` only means the display call went through; nothing is known about
/// whether the user saw it.
pub trait Notifier {
    fn show(&self, notice: &Notice) -> Result<(), NotifyError>;
}

/// Native desktop notifications (toast on Windows)
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn show(&self, notice: &Notice) -> Result<(), NotifyError> {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(&notice.app_name)
            .summary(&notice.title)
            .body(&notice.message);
        for action in &notice.actions {
            notification.action(&action.argument, &action.label);
        }
        notification
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_mentions_warning_threshold() {
        let notice = Notice::advisory(30);
        assert!(notice.message.contains("over 30 days"));
        let labels: Vec<&str> = notice.actions.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Later", "Restart Now"]);
    }

    #[test]
    fn test_countdown_mentions_remaining_minutes() {
        let notice = Notice::countdown(60, 3);
        assert_eq!(
            notice.message,
            "Your system has been running for over 60 days. It will restart in 3 minutes."
        );
        assert!(notice.actions.is_empty());
    }
}
