// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use entrigcommon::messages::NotificationEvent;
use parking_lot::Mutex;

/// Single-slot inbox for the notification that launched the app.
///
/// Set at most once per cold start; the first [`Self::take`] consumes the
/// value, subsequent calls return `None` until the next cold start.
#[derive(Debug, Default)]
pub struct InitialNotificationSlot {
    slot: Mutex<Option<NotificationEvent>>,
}

impl InitialNotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the launch notification, replacing any unconsumed one.
    pub fn set(&self, event: NotificationEvent) {
        *self.slot.lock() = Some(event);
    }

    /// Consumes the launch notification.
    pub fn take(&self) -> Option<NotificationEvent> {
        self.slot.lock().take()
    }
}
