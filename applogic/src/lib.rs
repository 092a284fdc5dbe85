// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Application-facing surface of the Entrig client

pub mod api;
pub mod background_execution;
pub mod logging;

pub(crate) mod notifier;
