// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use entrigapiclient::{ApiClient, registration_api::RegistrationRequestError};
use entrigcommon::{
    DEFAULT_SDK,
    identifiers::{DeliveryId, DeviceToken, RegistrationId},
    messages::{DeliveryStatus, RegisterRequest},
};
use parking_lot::Mutex;
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::platform::PushPlatform;

pub mod persistence;

use persistence::RegistrationRecord;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Notification permission not granted")]
    PermissionNotGranted,
    #[error("Permission request failed: {0}")]
    Permission(String),
    #[error("Failed to register for remote notifications: {0}")]
    Platform(String),
    #[error(transparent)]
    Request(#[from] RegistrationRequestError),
    #[error("Failed to persist registration: {0}")]
    Persistence(#[from] sqlx::Error),
    #[error("Registration was superseded by a newer one")]
    Superseded,
}

#[derive(Error, Debug)]
pub enum UnregisterError {
    #[error("Not registered")]
    NotRegistered,
    #[error(transparent)]
    Request(#[from] RegistrationRequestError),
    #[error("Failed to clear registration: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Parameters of a [`RegistrationManager::register_user`] call.
///
/// `sdk` identifies the wrapper SDK the call originates from and defaults to
/// `"ios"`. `is_debug` defaults to the build profile of this crate.
#[derive(Debug, Clone)]
pub struct RegistrationParams {
    pub user_id: String,
    pub sdk: String,
    pub is_debug: Option<bool>,
}

impl RegistrationParams {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            sdk: DEFAULT_SDK.to_owned(),
            is_debug: None,
        }
    }

    pub fn with_sdk(mut self, sdk: impl Into<String>) -> Self {
        self.sdk = sdk.into();
        self
    }

    pub fn with_is_debug(mut self, is_debug: bool) -> Self {
        self.is_debug = Some(is_debug);
        self
    }

    fn resolved_is_debug(&self) -> bool {
        self.is_debug.unwrap_or(cfg!(debug_assertions))
    }
}

type RegistrationResult = Result<RegistrationId, RegistrationError>;

/// Completion of an in-flight registration.
///
/// Resolves once the device token round trip and the backend call have
/// finished. Single-fire: when the registration is overwritten by a newer
/// [`RegistrationManager::register_user`] call before completing, waiting
/// yields [`RegistrationError::Superseded`].
#[derive(Debug)]
pub struct RegistrationHandle {
    rx: oneshot::Receiver<RegistrationResult>,
}

impl RegistrationHandle {
    pub async fn wait(self) -> RegistrationResult {
        self.rx
            .await
            .unwrap_or(Err(RegistrationError::Superseded))
    }
}

struct PendingRegistration {
    params: RegistrationParams,
    responder: oneshot::Sender<RegistrationResult>,
}

/// Coordinates device registration between the platform push service and
/// the registration backend.
///
/// A registration is a two-step exchange: [`Self::register_user`] stores the
/// request and asks the platform for a device token; the host application
/// feeds the token (or the platform error) back through
/// [`Self::device_token_received`] / [`Self::device_token_failed`], which
/// completes the exchange against the backend.
pub struct RegistrationManager<P> {
    api_client: ApiClient,
    pool: SqlitePool,
    platform: P,
    // At most one in-flight registration; a newer one wins.
    pending: Mutex<Option<PendingRegistration>>,
}

impl<P: PushPlatform> RegistrationManager<P> {
    pub fn new(api_client: ApiClient, pool: SqlitePool, platform: P) -> Self {
        Self {
            api_client,
            pool,
            platform,
            pending: Mutex::new(None),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Begins a registration and returns its completion handle.
    ///
    /// An unresolved earlier registration is overwritten; its handle
    /// resolves with [`RegistrationError::Superseded`].
    pub fn register_user(&self, params: RegistrationParams) -> RegistrationHandle {
        let (responder, rx) = oneshot::channel();
        let previous = self
            .pending
            .lock()
            .replace(PendingRegistration { params, responder });
        if previous.is_some() {
            debug!("overwriting pending registration");
        }
        self.platform.register_for_remote_notifications();
        RegistrationHandle { rx }
    }

    /// Feeds a device token obtained from the platform into the pending
    /// registration.
    ///
    /// Issues the backend register call and persists the resulting
    /// registration record. Without a pending registration the token is
    /// ignored.
    pub async fn device_token_received(&self, token: DeviceToken) {
        let Some(PendingRegistration { params, responder }) = self.pending.lock().take() else {
            debug!("device token received without pending registration");
            return;
        };
        let result = self.complete_registration(&params, &token).await;
        if let Err(error) = &result {
            error!(%error, "registration failed");
        }
        // The caller may have dropped the handle.
        let _ = responder.send(result);
    }

    /// Fails the pending registration after a platform registration error.
    ///
    /// No backend call is made.
    pub fn device_token_failed(&self, message: impl Into<String>) {
        let Some(PendingRegistration { responder, .. }) = self.pending.lock().take() else {
            debug!("device token failure without pending registration");
            return;
        };
        let message = message.into();
        error!(reason = %message, "failed to register for remote notifications");
        let _ = responder.send(Err(RegistrationError::Platform(message)));
    }

    async fn complete_registration(
        &self,
        params: &RegistrationParams,
        token: &DeviceToken,
    ) -> RegistrationResult {
        let is_debug = params.resolved_is_debug();
        let request = RegisterRequest {
            user_id: params.user_id.clone(),
            apn_token: token.to_string(),
            is_sandbox: is_debug,
            sdk: params.sdk.clone(),
            is_debug,
        };
        let registration_id = self.api_client.register(&request).await?;

        let record = RegistrationRecord::new(registration_id.clone(), params.user_id.clone());
        record.store(&self.pool).await?;
        info!(%registration_id, "user registered");
        Ok(registration_id)
    }

    /// Removes the active registration, both from the backend and locally.
    pub async fn unregister(&self) -> Result<(), UnregisterError> {
        let Some(record) = RegistrationRecord::load(&self.pool).await? else {
            return Err(UnregisterError::NotRegistered);
        };
        self.platform.unregister_for_remote_notifications();
        self.api_client.unregister(&record.registration_id).await?;
        RegistrationRecord::delete(&self.pool).await?;
        info!("user unregistered");
        Ok(())
    }

    /// The active registration, if any.
    pub async fn registration(&self) -> sqlx::Result<Option<RegistrationRecord>> {
        RegistrationRecord::load(&self.pool).await
    }

    /// Reports the delivery state of a notification.
    ///
    /// Best effort: failures are logged and swallowed, the notification flow
    /// must not depend on the tracking backend.
    pub async fn report_delivery_status(&self, delivery_id: &DeliveryId, status: DeliveryStatus) {
        if let Err(error) = self
            .api_client
            .report_delivery_status(delivery_id, status)
            .await
        {
            error!(%error, %delivery_id, "failed to report delivery status");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::platform::PlatformResult;

    use super::*;

    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[derive(Default)]
    struct FakePlatform {
        deny_permission: bool,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl PushPlatform for FakePlatform {
        async fn request_permission(&self) -> PlatformResult<bool> {
            self.calls.lock().push("request_permission");
            Ok(!self.deny_permission)
        }

        fn register_for_remote_notifications(&self) {
            self.calls.lock().push("register_for_remote_notifications");
        }

        fn unregister_for_remote_notifications(&self) {
            self.calls.lock().push("unregister_for_remote_notifications");
        }
    }

    async fn manager_against(
        url: &str,
        pool: SqlitePool,
    ) -> anyhow::Result<RegistrationManager<FakePlatform>> {
        RegistrationRecord::create_table(&pool).await?;
        let api_client = ApiClient::with_default_http_client(url, "test-key")?;
        Ok(RegistrationManager::new(
            api_client,
            pool,
            FakePlatform::default(),
        ))
    }

    fn token() -> DeviceToken {
        DeviceToken::new(vec![0x0a, 0xff, 0x00, 0x42])
    }

    #[sqlx::test]
    async fn register_flow_persists_record(pool: SqlitePool) -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "reg-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager_against(&server.uri(), pool).await?;
        let handle = manager.register_user(RegistrationParams::new("user-123"));
        assert!(
            manager
                .platform()
                .calls
                .lock()
                .contains(&"register_for_remote_notifications")
        );

        manager.device_token_received(token()).await;

        let registration_id = handle.wait().await?;
        assert_eq!(registration_id, RegistrationId::new("reg-1"));

        let record = manager.registration().await?.unwrap();
        assert_eq!(record.registration_id, RegistrationId::new("reg-1"));
        assert_eq!(record.user_id, "user-123");
        Ok(())
    }

    #[sqlx::test]
    async fn platform_failure_resolves_without_network_call(
        pool: SqlitePool,
    ) -> anyhow::Result<()> {
        // Unroutable endpoint: the test fails on any network attempt.
        let manager = manager_against("http://127.0.0.1:1", pool).await?;

        let handle = manager.register_user(RegistrationParams::new("user-123"));
        manager.device_token_failed("simulator does not support remote notifications");

        let error = handle.wait().await.unwrap_err();
        assert!(matches!(error, RegistrationError::Platform(_)));
        assert!(manager.registration().await?.is_none());
        Ok(())
    }

    #[sqlx::test]
    async fn newer_registration_supersedes_pending_one(pool: SqlitePool) -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "reg-2" })))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager_against(&server.uri(), pool).await?;
        let first = manager.register_user(RegistrationParams::new("user-123"));
        let second = manager.register_user(RegistrationParams::new("user-456"));

        manager.device_token_received(token()).await;

        assert!(matches!(
            first.wait().await.unwrap_err(),
            RegistrationError::Superseded
        ));
        assert_eq!(second.wait().await?, RegistrationId::new("reg-2"));

        let record = manager.registration().await?.unwrap();
        assert_eq!(record.user_id, "user-456");
        Ok(())
    }

    #[sqlx::test]
    async fn token_without_pending_registration_is_ignored(
        pool: SqlitePool,
    ) -> anyhow::Result<()> {
        let manager = manager_against("http://127.0.0.1:1", pool).await?;
        manager.device_token_received(token()).await;
        manager.device_token_failed("late failure");
        assert!(manager.registration().await?.is_none());
        Ok(())
    }

    #[sqlx::test]
    async fn register_error_status_clears_pending_state(pool: SqlitePool) -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager_against(&server.uri(), pool).await?;
        let handle = manager.register_user(RegistrationParams::new("user-123"));
        manager.device_token_received(token()).await;

        assert!(matches!(
            handle.wait().await.unwrap_err(),
            RegistrationError::Request(_)
        ));
        assert!(manager.registration().await?.is_none());

        // The slot was cleared: a straggling token is a no-op.
        manager.device_token_received(token()).await;
        Ok(())
    }

    #[sqlx::test]
    async fn unregister_without_record_fails(pool: SqlitePool) -> anyhow::Result<()> {
        let manager = manager_against("http://127.0.0.1:1", pool).await?;
        let error = manager.unregister().await.unwrap_err();
        assert!(matches!(error, UnregisterError::NotRegistered));
        Ok(())
    }

    #[sqlx::test]
    async fn unregister_clears_record(pool: SqlitePool) -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "reg-1" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/unregister"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager_against(&server.uri(), pool).await?;
        let handle = manager.register_user(RegistrationParams::new("user-123"));
        manager.device_token_received(token()).await;
        handle.wait().await?;

        manager.unregister().await?;
        assert!(manager.registration().await?.is_none());
        assert!(
            manager
                .platform()
                .calls
                .lock()
                .contains(&"unregister_for_remote_notifications")
        );
        Ok(())
    }

    #[sqlx::test]
    async fn failed_unregister_keeps_record(pool: SqlitePool) -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "reg-1" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/unregister"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let manager = manager_against(&server.uri(), pool).await?;
        let handle = manager.register_user(RegistrationParams::new("user-123"));
        manager.device_token_received(token()).await;
        handle.wait().await?;

        assert!(matches!(
            manager.unregister().await.unwrap_err(),
            UnregisterError::Request(_)
        ));
        assert!(manager.registration().await?.is_some());
        Ok(())
    }
}
