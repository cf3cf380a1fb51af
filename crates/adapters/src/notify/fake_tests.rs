// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_notify_records_notices() {
    let adapter = FakeNotifyAdapter::new();

    adapter
        .notify(&Notice::new("run-1", "Apply rejected"))
        .await
        .unwrap();
    adapter
        .notify(&Notice::new("run-1", "Discard rejected"))
        .await
        .unwrap();

    let notices = adapter.notices();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].body, "Apply rejected");
    assert_eq!(notices[1].body, "Discard rejected");
}

#[tokio::test]
async fn clones_share_recorded_notices() {
    let adapter = FakeNotifyAdapter::new();
    let clone = adapter.clone();
    clone.notify(&Notice::new("t", "b")).await.unwrap();
    assert_eq!(adapter.notices().len(), 1);
}
