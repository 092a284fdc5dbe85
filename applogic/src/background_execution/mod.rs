// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Delivery reporting from the notification service extension
//!
//! The service extension runs in its own process, without the host app's
//! [`Entrig`] instance; reporting therefore builds a one-off client per
//! call, authenticated with the API key the extension passes in.
//!
//! [`Entrig`]: crate::api::Entrig

use entrigapiclient::{
    ApiClient, ApiClientInitError, DEFAULT_BASE_URL, delivery_api::DeliveryRequestError,
};
use entrigcommon::messages::{DeliveryStatus, NotificationEvent};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[cfg(target_os = "ios")]
pub mod swift_api;

#[cfg(target_os = "ios")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IncomingDeliveryReport {
    pub(crate) api_key: String,
    pub(crate) payload: Value,
}

#[derive(Debug, Error)]
pub enum DeliveryReportError {
    #[error("No delivery id found in notification payload")]
    MissingDeliveryId,
    #[error(transparent)]
    Init(#[from] ApiClientInitError),
    #[error(transparent)]
    Request(#[from] DeliveryRequestError),
}

/// Reports a "delivered" status for the given notification payload.
pub async fn report_delivered(api_key: &str, payload: &Value) -> Result<(), DeliveryReportError> {
    report_delivered_to(DEFAULT_BASE_URL, api_key, payload).await
}

pub(crate) async fn report_delivered_to(
    base_url: &str,
    api_key: &str,
    payload: &Value,
) -> Result<(), DeliveryReportError> {
    let event = NotificationEvent::from_payload(payload);
    let delivery_id = event
        .delivery_id
        .ok_or(DeliveryReportError::MissingDeliveryId)?;
    let api_client = ApiClient::with_default_http_client(base_url, api_key)?;
    api_client
        .report_delivery_status(&delivery_id, DeliveryStatus::Delivered)
        .await?;
    info!(%delivery_id, "delivery reported from service extension");
    Ok(())
}
