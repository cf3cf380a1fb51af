// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults() {
    let config = MonitorConfig::default();
    assert_eq!(config.interval, Duration::from_secs(1));
    assert_eq!(config.request_timeout, Duration::from_secs(10));
    assert_eq!(config.stale_after, 3);
    assert_eq!(config.max_consecutive_failures, None);
}

#[yare::parameterized(
    fresh          = { 3, 0, false },
    below          = { 3, 2, false },
    at_threshold   = { 3, 3, true },
    above          = { 3, 7, true },
    disabled       = { 0, 100, false },
)]
fn stale_threshold(stale_after: u32, failures: u32, expected: bool) {
    let config = MonitorConfig::default().with_stale_after(stale_after);
    assert_eq!(config.is_stale(failures), expected);
}

#[yare::parameterized(
    unlimited     = { None, 1_000, false },
    below_cap     = { Some(5), 4, false },
    at_cap        = { Some(5), 5, true },
)]
fn failure_limit(max: Option<u32>, failures: u32, expected: bool) {
    let config = MonitorConfig::default().with_max_consecutive_failures(max);
    assert_eq!(config.failure_limit_reached(failures), expected);
}
