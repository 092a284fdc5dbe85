// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Wire messages and notification payload model.

mod payload;
mod registration;

pub use payload::NotificationEvent;
pub use registration::{
    DeliveryStatus, DeliveryStatusRequest, RegisterRequest, RegisterResponse, UnregisterRequest,
};
