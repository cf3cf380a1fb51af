// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notification adapter using notify-rust.

use super::{Notice, NotifyAdapter, NotifyError};
use async_trait::async_trait;

const APP_NAME: &str = "rw";

#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

/// Run a blocking `show` off the async workers and wait for it.
///
/// The CLI exits right after a rejection, so delivery has to finish before
/// `notify` returns.
async fn deliver<F>(show: F) -> Result<(), NotifyError>
where
    F: FnOnce() -> Result<(), String> + Send + 'static,
{
    tokio::task::spawn_blocking(show)
        .await
        .map_err(|e| NotifyError::SendFailed(e.to_string()))?
        .map_err(NotifyError::SendFailed)
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, notice: &Notice) -> Result<(), NotifyError> {
        let notice = notice.clone();
        tracing::debug!(title = %notice.title, "sending desktop notification");
        deliver(move || {
            notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary(&notice.title)
                .body(&notice.body)
                .show()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .await
    }
}

#[cfg(test)]
#[path = "desktop_tests.rs"]
mod tests;
