// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use entrigcommon::messages::NotificationEvent;
use parking_lot::Mutex;

/// Listener for notifications received while the app is in the foreground.
pub trait OnNotificationReceived: Send + Sync {
    fn on_notification_received(&self, event: &NotificationEvent);
}

/// Listener for notification opened events.
pub trait OnNotificationOpened: Send + Sync {
    fn on_notification_opened(&self, event: &NotificationEvent);
}

/// Holds the (at most one each) registered listeners.
#[derive(Default)]
pub(crate) struct ListenerHub {
    received: Mutex<Option<Arc<dyn OnNotificationReceived>>>,
    opened: Mutex<Option<Arc<dyn OnNotificationOpened>>>,
}

impl ListenerHub {
    pub(crate) fn set_received(&self, listener: Option<Arc<dyn OnNotificationReceived>>) {
        *self.received.lock() = listener;
    }

    pub(crate) fn set_opened(&self, listener: Option<Arc<dyn OnNotificationOpened>>) {
        *self.opened.lock() = listener;
    }

    pub(crate) fn notify_received(&self, event: &NotificationEvent) {
        // Clone out of the lock so a listener can re-register itself.
        let listener = self.received.lock().clone();
        if let Some(listener) = listener {
            listener.on_notification_received(event);
        }
    }

    pub(crate) fn notify_opened(&self, event: &NotificationEvent) {
        let listener = self.opened.lock().clone();
        if let Some(listener) = listener {
            listener.on_notification_opened(event);
        }
    }
}
