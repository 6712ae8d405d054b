// SPDX-License-Identifier: MPL-2.0
//! Notification port used by the studio to report outcomes.

/// Kind of notification emitted by the studio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Failure,
}

/// Receives user-facing notifications.
///
/// `title` and `detail` are i18n message keys; resolving them to text is the
/// sink's business. Implementations must not fail or block, and nothing they
/// do feeds back into studio state.
pub trait NotificationSink {
    fn notify(&mut self, kind: NotifyKind, title: &str, detail: Option<&str>);
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn notify(&mut self, kind: NotifyKind, title: &str, detail: Option<&str>) {
        (**self).notify(kind, title, detail);
    }
}
