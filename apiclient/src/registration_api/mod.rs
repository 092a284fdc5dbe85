// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use entrigcommon::{
    endpoint_paths::{ENDPOINT_REGISTER, ENDPOINT_UNREGISTER},
    identifiers::RegistrationId,
    messages::{RegisterRequest, RegisterResponse, UnregisterRequest},
};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::info;

use crate::ApiClient;

#[derive(Error, Debug)]
pub enum RegistrationRequestError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error("Unexpected status code {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("Invalid response format")]
    InvalidResponse,
}

impl ApiClient {
    /// Registers a device token for a user.
    ///
    /// Returns the server-issued registration id. A single attempt is made;
    /// the caller decides whether to retry.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegistrationId, RegistrationRequestError> {
        let response = self
            .client
            .post(self.endpoint_url(ENDPOINT_REGISTER))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistrationRequestError::UnexpectedStatus { status, body });
        }

        let response: RegisterResponse = response
            .json()
            .await
            .map_err(|_| RegistrationRequestError::InvalidResponse)?;
        info!(registration_id = %response.id, "device registered");
        Ok(response.id)
    }

    /// Removes a registration record.
    pub async fn unregister(
        &self,
        registration_id: &RegistrationId,
    ) -> Result<(), RegistrationRequestError> {
        let request = UnregisterRequest {
            id: registration_id.clone(),
        };
        let response = self
            .client
            .post(self.endpoint_url(ENDPOINT_UNREGISTER))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistrationRequestError::UnexpectedStatus { status, body });
        }
        info!(%registration_id, "device unregistered");
        Ok(())
    }
}
