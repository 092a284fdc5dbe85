// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Public API of the Entrig client

mod sdk;
mod types;

pub use entrigcommon::{
    config::EntrigConfig,
    identifiers::{DeliveryId, DeviceToken, RegistrationId},
    messages::{DeliveryStatus, NotificationEvent},
};
pub use entrigcoreclient::{
    PlatformResult, PushPlatform, RegistrationError, RegistrationHandle, RegistrationParams,
    UnregisterError,
};

pub use crate::notifier::{OnNotificationOpened, OnNotificationReceived};
pub use sdk::Entrig;
pub use types::PresentationOptions;
