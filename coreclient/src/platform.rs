// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

/// The result type of a failable [`PushPlatform`] method
pub type PlatformResult<T> = anyhow::Result<T>;

/// Access to the platform push service (APNs on Apple platforms).
///
/// Implemented by the host application, which forwards these calls to the
/// OS. Both registration calls are begin-only: the outcome of a remote
/// registration arrives later through the application lifecycle hooks and is
/// fed back via [`RegistrationManager`].
///
/// [`RegistrationManager`]: crate::RegistrationManager
#[allow(async_fn_in_trait, reason = "trait is only used in the workspace")]
#[trait_variant::make(Send)]
pub trait PushPlatform {
    /// Prompts the user for notification permission.
    ///
    /// Resolves to `Ok(false)` when the user denies the prompt.
    async fn request_permission(&self) -> PlatformResult<bool>;

    /// Begins an APNs device token request.
    fn register_for_remote_notifications(&self);

    /// Invalidates the APNs device token.
    fn unregister_for_remote_notifications(&self);
}
