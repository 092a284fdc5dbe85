// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Registration logic of the Entrig client.
//!
//! The [`RegistrationManager`] coordinates the exchange between the platform
//! push service and the registration backend; the registration record is
//! persisted in a local SQLite database so that unregistration works across
//! app restarts.

mod notifications;
mod platform;
mod registration;

pub use notifications::InitialNotificationSlot;
pub use platform::{PlatformResult, PushPlatform};
pub use registration::{
    RegistrationError, RegistrationHandle, RegistrationManager, RegistrationParams,
    UnregisterError,
    persistence::{RegistrationRecord, open_registration_db},
};
