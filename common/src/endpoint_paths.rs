// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Registration endpoints
pub const ENDPOINT_REGISTER: &str = "/register";
pub const ENDPOINT_UNREGISTER: &str = "/unregister";

/// Delivery tracking endpoint
pub const ENDPOINT_DELIVERY_STATUS: &str = "/delivery-status";
