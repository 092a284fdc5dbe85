// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{path::Path, sync::Arc};

use anyhow::Result;
use entrigapiclient::{ApiClient, DEFAULT_BASE_URL};
use entrigcommon::{
    config::EntrigConfig,
    identifiers::DeviceToken,
    messages::{DeliveryStatus, NotificationEvent},
};
use entrigcoreclient::{
    InitialNotificationSlot, PlatformResult, PushPlatform, RegistrationError, RegistrationHandle,
    RegistrationManager, RegistrationParams, UnregisterError, open_registration_db,
};
use serde_json::Value;
use tracing::info;

use crate::notifier::{ListenerHub, OnNotificationOpened, OnNotificationReceived};

use super::types::PresentationOptions;

/// The Entrig push notification client.
///
/// One instance per process, created during app launch and owned by the
/// host. The host forwards its notification lifecycle hooks
/// (`didRegisterForRemoteNotifications...`, `willPresentNotification`, ...)
/// to the methods of this type.
pub struct Entrig<P> {
    config: EntrigConfig,
    manager: RegistrationManager<P>,
    listeners: ListenerHub,
    initial_notification: InitialNotificationSlot,
}

impl<P: PushPlatform> Entrig<P> {
    /// Creates a client against the production registration service.
    ///
    /// `db_dir` is where the registration database lives; on iOS this is
    /// the app's application-support directory.
    pub async fn new(
        config: EntrigConfig,
        platform: P,
        db_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        Self::with_base_url(config, platform, db_dir, DEFAULT_BASE_URL).await
    }

    /// Creates a client against the given registration service URL.
    pub async fn with_base_url(
        config: EntrigConfig,
        platform: P,
        db_dir: impl AsRef<Path>,
        base_url: impl AsRef<str>,
    ) -> Result<Self> {
        let api_client = ApiClient::with_default_http_client(base_url, config.api_key())?;
        let pool = open_registration_db(db_dir).await?;
        let manager = RegistrationManager::new(api_client, pool, platform);
        info!("Entrig client configured");
        Ok(Self {
            config,
            manager,
            listeners: ListenerHub::default(),
            initial_notification: InitialNotificationSlot::new(),
        })
    }

    // Registration

    /// Registers a user for push notifications.
    ///
    /// When the configuration asks for automatic permission handling, the
    /// permission prompt runs first and a denial fails the registration
    /// before any platform or network call. The returned handle resolves
    /// once the device token round trip completes; see
    /// [`Entrig::device_token_received`].
    pub async fn register(
        &self,
        user_id: impl Into<String>,
    ) -> Result<RegistrationHandle, RegistrationError> {
        self.register_with(RegistrationParams::new(user_id)).await
    }

    /// Registers a user with explicit parameters.
    pub async fn register_with(
        &self,
        params: RegistrationParams,
    ) -> Result<RegistrationHandle, RegistrationError> {
        if self.config.handle_permission() {
            match self.manager.platform().request_permission().await {
                Ok(true) => {}
                Ok(false) => return Err(RegistrationError::PermissionNotGranted),
                Err(error) => return Err(RegistrationError::Permission(error.to_string())),
            }
        }
        Ok(self.manager.register_user(params))
    }

    /// Unregisters the current user from push notifications.
    pub async fn unregister(&self) -> Result<(), UnregisterError> {
        self.manager.unregister().await
    }

    /// Manually requests notification permission.
    pub async fn request_permission(&self) -> PlatformResult<bool> {
        self.manager.platform().request_permission().await
    }

    // Platform lifecycle hooks

    /// Call from `application:didRegisterForRemoteNotificationsWithDeviceToken:`.
    pub async fn device_token_received(&self, token: DeviceToken) {
        self.manager.device_token_received(token).await;
    }

    /// Call from `application:didFailToRegisterForRemoteNotificationsWithError:`.
    pub fn device_token_failed(&self, message: impl Into<String>) {
        self.manager.device_token_failed(message);
    }

    /// Call from `application:didFinishLaunchingWithOptions:` with the
    /// remote-notification launch payload, if any.
    pub fn check_launch_notification(&self, payload: Option<&Value>) {
        let Some(payload) = payload else {
            return;
        };
        self.initial_notification
            .set(NotificationEvent::from_payload(payload));
    }

    /// The notification the app was launched from, if not yet consumed.
    pub fn take_initial_notification(&self) -> Option<NotificationEvent> {
        self.initial_notification.take()
    }

    // Notification handling

    /// Sets the listener for notifications received in the foreground.
    pub fn set_foreground_notification_listener(
        &self,
        listener: Option<Arc<dyn OnNotificationReceived>>,
    ) {
        self.listeners.set_received(listener);
    }

    /// Sets the listener for notification opened events.
    pub fn set_notification_opened_listener(
        &self,
        listener: Option<Arc<dyn OnNotificationOpened>>,
    ) {
        self.listeners.set_opened(listener);
    }

    /// Call from `userNotificationCenter:willPresentNotification:...` with
    /// the notification payload.
    ///
    /// Reports a "delivered" status for the notification and dispatches it
    /// to the foreground listener.
    pub async fn will_present_notification(&self, payload: &Value) -> NotificationEvent {
        let event = NotificationEvent::from_payload(payload);
        self.listeners.notify_received(&event);
        if let Some(delivery_id) = &event.delivery_id {
            self.manager
                .report_delivery_status(delivery_id, DeliveryStatus::Delivered)
                .await;
        }
        event
    }

    /// Call from `userNotificationCenter:didReceiveNotificationResponse:...`
    /// with the notification payload.
    ///
    /// Reports a "read" status for the notification and dispatches it to
    /// the opened listener.
    pub async fn notification_opened(&self, payload: &Value) -> NotificationEvent {
        let event = NotificationEvent::from_payload(payload);
        self.listeners.notify_opened(&event);
        if let Some(delivery_id) = &event.delivery_id {
            self.manager
                .report_delivery_status(delivery_id, DeliveryStatus::Read)
                .await;
        }
        event
    }

    /// Presentation options for the will-present completion handler,
    /// honoring the foreground-notification configuration.
    pub fn presentation_options(&self) -> PresentationOptions {
        if self.config.show_foreground_notification() {
            PresentationOptions::all()
        } else {
            PresentationOptions::empty()
        }
    }
}
