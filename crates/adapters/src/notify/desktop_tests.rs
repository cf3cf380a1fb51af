// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn deliver_waits_for_show_to_finish() {
    let shown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shown);

    deliver(move || {
        std::thread::sleep(std::time::Duration::from_millis(20));
        flag.store(true, Ordering::SeqCst);
        Ok(())
    })
    .await
    .unwrap();

    assert!(shown.load(Ordering::SeqCst));
}

#[tokio::test]
async fn show_error_is_a_send_failure() {
    let err = deliver(|| Err("no notification server".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, NotifyError::SendFailed(ref m) if m == "no notification server"));
}

#[tokio::test]
async fn panicking_show_is_a_send_failure() {
    let err = deliver(|| panic!("display gone")).await.unwrap_err();
    assert!(matches!(err, NotifyError::SendFailed(_)));
}
