// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

use crate::identifiers::{DeliveryId, RegistrationId};

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub user_id: String,
    pub apn_token: String,
    pub is_sandbox: bool,
    pub sdk: String,
    pub is_debug: bool,
}

/// Response of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: RegistrationId,
}

/// Body of `POST /unregister`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnregisterRequest {
    pub id: RegistrationId,
}

/// Delivery state of a single notification, as reported to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Delivered,
    Read,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Read => "read",
        }
    }
}

/// Body of `POST /delivery-status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryStatusRequest {
    pub delivery_id: DeliveryId,
    pub status: DeliveryStatus,
}
