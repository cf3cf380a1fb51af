// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn noop_notify_returns_ok() {
    let adapter = NoOpNotifyAdapter::new();
    let result = adapter.notify(&Notice::new("run-1", "rejected")).await;
    assert!(result.is_ok());
}

#[test]
fn noop_notify_is_zero_sized() {
    let adapter = NoOpNotifyAdapter;
    assert_eq!(std::mem::size_of_val(&adapter), 0);
}
