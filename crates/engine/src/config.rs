// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitor tuning knobs

use std::time::Duration;

/// Default pause between the end of one tick and the start of the next.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);
/// Default upper bound on a single backend request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Default number of consecutive run-fetch failures before data is stale.
pub const DEFAULT_STALE_AFTER: u32 = 3;

/// Configuration for one run monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub interval: Duration,
    pub request_timeout: Duration,
    /// Consecutive run-fetch failures after which the view is marked stale.
    /// Zero disables the indicator.
    pub stale_after: u32,
    /// Consecutive run-fetch failures after which polling gives up.
    /// `None` retries forever.
    pub max_consecutive_failures: Option<u32>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            stale_after: DEFAULT_STALE_AFTER,
            max_consecutive_failures: None,
        }
    }
}

impl MonitorConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_stale_after(mut self, n: u32) -> Self {
        self.stale_after = n;
        self
    }

    pub fn with_max_consecutive_failures(mut self, n: Option<u32>) -> Self {
        self.max_consecutive_failures = n;
        self
    }

    pub(crate) fn is_stale(&self, consecutive_failures: u32) -> bool {
        self.stale_after > 0 && consecutive_failures >= self.stale_after
    }

    pub(crate) fn failure_limit_reached(&self, consecutive_failures: u32) -> bool {
        self.max_consecutive_failures
            .is_some_and(|max| consecutive_failures >= max)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
