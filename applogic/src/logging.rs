// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, registry, util::SubscriberInitExt};

static INIT_LOGGER_ONCE: Once = Once::new();

/// Initializes the log subscriber.
///
/// Idempotent; safe to call from every entry point. The default level is
/// INFO in debug builds and WARN otherwise, overridable via `RUST_LOG`.
pub fn init_logger() {
    INIT_LOGGER_ONCE.call_once(|| {
        let default_level = if cfg!(debug_assertions) {
            LevelFilter::INFO
        } else {
            LevelFilter::WARN
        };

        let env_filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        registry().with(env_filter).with(fmt::layer()).init();
    });
}
