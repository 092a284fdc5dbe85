// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::ffi::{CStr, c_char};

use tokio::runtime::Builder;
use tracing::error;

use crate::{
    background_execution::{IncomingDeliveryReport, report_delivered},
    logging::init_logger,
};

/// This method gets called from the iOS notification service extension.
///
/// `content` is a JSON object `{"apiKey": ..., "payload": ...}` where
/// `payload` is the notification's `userInfo` dictionary.
///
/// # Safety
///
/// The caller must ensure that the content is a pointer to a valid C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn entrig_report_delivered(content: *const c_char) {
    assert!(!content.is_null());
    let c_str = unsafe { CStr::from_ptr(content) };

    init_logger();

    let Ok(json_str) = c_str.to_str() else {
        error!("delivery report content is not valid UTF-8");
        return;
    };
    let report: IncomingDeliveryReport = match serde_json::from_str(json_str) {
        Ok(report) => report,
        Err(error) => {
            error!(%error, "failed to parse delivery report content");
            return;
        }
    };

    let runtime = match Builder::new_multi_thread()
        .thread_name("entrig-nse")
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            error!(%error, "failed to initialize tokio runtime");
            return;
        }
    };

    if let Err(error) = runtime.block_on(report_delivered(&report.api_key, &report.payload)) {
        error!(%error, "failed to report delivery status");
    }
}
