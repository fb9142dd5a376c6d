//! Transient user-facing notifications

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

/// Shown when the initial fetch fails
pub const LOAD_FAILED: &str = "Failed to load vendor information. Please try again.";
/// Shown when submit is blocked by validation errors
pub const CORRECT_ERRORS: &str = "Please correct the errors in the form";
/// Shown when a save succeeds
pub const SAVE_SUCCEEDED: &str = "Contact information updated successfully!";
/// Shown when a save fails
pub const SAVE_FAILED: &str = "Failed to update contact information. Please try again.";

/// How long a notification stays up before hiding itself
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(6000);

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
}

/// A dismissible message with a severity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Notification {
    pub visible: bool,
    pub message: String,
    pub severity: Severity,
    /// When the notification was last raised
    #[serde(skip)]
    pub raised_at: Option<Instant>,
}

impl Notification {
    /// Build a visible notification raised now
    pub fn raise(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            visible: true,
            message: message.into(),
            severity,
            raised_at: Some(Instant::now()),
        }
    }

    /// Instant at which a visible notification should hide itself
    #[must_use]
    pub fn deadline(&self, auto_hide: Duration) -> Option<Instant> {
        if !self.visible {
            return None;
        }
        self.raised_at.map(|raised| raised + auto_hide)
    }

    /// Whether a visible notification has outlived `auto_hide` at `now`
    #[must_use]
    pub fn is_expired(&self, now: Instant, auto_hide: Duration) -> bool {
        self.deadline(auto_hide).is_some_and(|deadline| now >= deadline)
    }

    /// Hide the notification, keeping its message and severity
    pub fn hide(&mut self) {
        self.visible = false;
    }
}
