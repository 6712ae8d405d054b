// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native window events (file drops, close requests) and drives the
//! notification auto-dismiss timer.

use super::Message;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Interval between notification timer checks.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Creates the window event subscription.
///
/// File drops are forwarded whatever their position; close requests are
/// intercepted so images can be released before exit.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(iced::window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Window(iced::window::Event::FileDropped(path)) => {
            Some(Message::FileDropped(path))
        }
        _ => None,
    })
}

/// Creates a periodic tick subscription while notifications are on screen.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
