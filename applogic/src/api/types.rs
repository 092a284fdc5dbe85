// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use bitflags::bitflags;

bitflags! {
    /// How the OS presents a notification while the app is in the
    /// foreground.
    ///
    /// Mirrors `UNNotificationPresentationOptions`; the host passes the set
    /// to the will-present completion handler.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PresentationOptions: u8 {
        const BANNER = 1;
        const SOUND = 1 << 1;
        const BADGE = 1 << 2;
    }
}
