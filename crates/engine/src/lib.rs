// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw-engine: polls a run and keeps its snapshot current

mod actions;
pub mod audit;
mod config;
mod error;
mod fetcher;
mod monitor;
mod poller;
mod user_cache;

pub use actions::RunActions;
pub use config::{MonitorConfig, DEFAULT_INTERVAL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STALE_AFTER};
pub use error::{ActionError, MonitorError};
pub use fetcher::Fetcher;
pub use monitor::{MonitorHandle, RunMonitor};
pub use poller::{Poller, PollerState, RunView, StopReason, TickOutcome};
pub use user_cache::UserCache;
