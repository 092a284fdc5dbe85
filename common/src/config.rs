// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use tracing::warn;

/// Configuration of the Entrig client.
///
/// Constructed once at startup and handed to the SDK on creation. The
/// behavior flags default to `true`: the client requests notification
/// permission on registration and notifications are shown while the app is
/// in the foreground.
#[derive(Debug, Clone)]
pub struct EntrigConfig {
    api_key: String,
    handle_permission: bool,
    show_foreground_notification: bool,
}

impl EntrigConfig {
    /// Creates a new configuration with the given API key and default flags.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        if api_key.is_empty() {
            warn!("API key is empty; requests to the registration service will fail");
        }
        Self {
            api_key,
            handle_permission: true,
            show_foreground_notification: true,
        }
    }

    /// Controls whether notification permission is requested automatically
    /// before registering.
    pub fn with_handle_permission(mut self, handle_permission: bool) -> Self {
        self.handle_permission = handle_permission;
        self
    }

    /// Controls whether notifications are presented while the app is in the
    /// foreground.
    pub fn with_show_foreground_notification(mut self, show: bool) -> Self {
        self.show_foreground_notification = show;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn handle_permission(&self) -> bool {
        self.handle_permission
    }

    pub fn show_foreground_notification(&self) -> bool {
        self.show_foreground_notification
    }
}
