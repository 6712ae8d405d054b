// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully (green, 3s duration).
    #[default]
    Success,
    /// Something went wrong (red, 5s duration).
    Error,
}

impl Severity {
    /// Returns the accent color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Returns the auto-dismiss duration for this severity.
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Duration {
        match self {
            Severity::Success => Duration::from_secs(3),
            Severity::Error => Duration::from_secs(5),
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    /// The i18n key for the title.
    message_key: String,
    /// Named arguments substituted into the title.
    message_args: Vec<(String, String)>,
    /// Optional i18n key for a second line of text.
    detail_key: Option<String>,
    created_at: Instant,
    /// Custom auto-dismiss duration (overrides severity default).
    custom_dismiss_duration: Option<Duration>,
}

impl Notification {
    /// Creates a new notification with the given severity and message key.
    ///
    /// The `message_key` should be a valid i18n key that will be resolved
    /// at render time.
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            detail_key: None,
            created_at: Instant::now(),
            custom_dismiss_duration: None,
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds a named argument for the title (`{ $name }` in the FTL file).
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((name.into(), value.into()));
        self
    }

    /// Adds a detail line, resolved through i18n like the title.
    #[must_use]
    pub fn with_detail(mut self, detail_key: impl Into<String>) -> Self {
        self.detail_key = Some(detail_key.into());
        self
    }

    /// Sets a custom auto-dismiss duration, overriding the severity default.
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.custom_dismiss_duration = Some(duration);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    #[must_use]
    pub fn detail_key(&self) -> Option<&str> {
        self.detail_key.as_deref()
    }

    /// Returns the age of this notification.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Returns the duration after which this notification disappears.
    #[must_use]
    pub fn dismiss_after(&self) -> Duration {
        self.custom_dismiss_duration
            .unwrap_or_else(|| self.severity.auto_dismiss_duration())
    }

    /// Returns whether this notification should auto-dismiss.
    #[must_use]
    pub fn should_auto_dismiss(&self) -> bool {
        self.age() >= self.dismiss_after()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn severity_colors_are_distinct() {
        assert_ne!(Severity::Success.color(), Severity::Error.color());
    }

    #[test]
    fn error_duration_is_longer_than_success() {
        assert!(Severity::Error.auto_dismiss_duration() > Severity::Success.auto_dismiss_duration());
    }

    #[test]
    fn detail_builder_sets_key() {
        let notification = Notification::error("title").with_detail("detail");
        assert_eq!(notification.message_key(), "title");
        assert_eq!(notification.detail_key(), Some("detail"));
    }

    #[test]
    fn with_arg_collects_arguments_in_order() {
        let notification = Notification::success("saved")
            .with_arg("path", "/tmp/a.jpg")
            .with_arg("size", "12");
        assert_eq!(
            notification.message_args(),
            &[
                ("path".to_string(), "/tmp/a.jpg".to_string()),
                ("size".to_string(), "12".to_string())
            ]
        );
    }

    #[test]
    fn custom_duration_overrides_severity_default() {
        let notification = Notification::success("test").auto_dismiss(Duration::ZERO);
        assert_eq!(notification.dismiss_after(), Duration::ZERO);
        assert!(notification.should_auto_dismiss());
    }

    #[test]
    fn fresh_notification_is_not_dismissed() {
        let notification = Notification::error("test");
        assert!(!notification.should_auto_dismiss());
    }
}
