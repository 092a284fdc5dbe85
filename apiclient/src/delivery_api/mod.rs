// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use entrigcommon::{
    endpoint_paths::ENDPOINT_DELIVERY_STATUS,
    identifiers::DeliveryId,
    messages::{DeliveryStatus, DeliveryStatusRequest},
};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::info;

use crate::ApiClient;

#[derive(Error, Debug)]
pub enum DeliveryRequestError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error("Unexpected status code {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

impl ApiClient {
    /// Reports the delivery state of a single notification.
    pub async fn report_delivery_status(
        &self,
        delivery_id: &DeliveryId,
        status: DeliveryStatus,
    ) -> Result<(), DeliveryRequestError> {
        let request = DeliveryStatusRequest {
            delivery_id: delivery_id.clone(),
            status,
        };
        let response = self
            .client
            .post(self.endpoint_url(ENDPOINT_DELIVERY_STATUS))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let response_status = response.status();
        if !response_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryRequestError::UnexpectedStatus {
                status: response_status,
                body,
            });
        }
        info!(%delivery_id, status = status.as_str(), "delivery status reported");
        Ok(())
    }
}
