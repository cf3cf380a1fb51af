// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the run backend and user notifications

pub mod notify;
pub mod resource;
pub mod traced;

pub use notify::{DesktopNotifyAdapter, NoOpNotifyAdapter, Notice, NotifyAdapter, NotifyError};
pub use resource::{FetchError, HttpConfig, HttpResourceAccess, ResourceAccess, RunContext};
pub use traced::TracedResources;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use resource::{FakeResourceAccess, ResourceCall};
