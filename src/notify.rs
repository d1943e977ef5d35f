use std::time::Duration;

/// Toast-style delay before a notice scrolls out of relevance.
const AUTO_DISMISS: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
}

/// Transient message shown after every completed mutation or rejected
/// submission. Cosmetic only, never part of the persisted data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Notification {
            message: message.into(),
            severity: Severity::Danger,
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        AUTO_DISMISS
    }
}
