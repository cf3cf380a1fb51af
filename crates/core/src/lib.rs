// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw-core: Core library for the runwatch (rw) run monitor

pub mod action;
pub mod descriptor;
pub mod duration;
pub mod id;
pub mod resource;
pub mod snapshot;
pub mod status;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use action::{available_actions, Action, ActionSet};
pub use descriptor::{
    classify, classify_phase, classify_result, classify_stage, Badge, ColorClass, PhaseDescriptor,
    RecheckFlags, StatusDescriptor,
};
pub use duration::{parse_duration, parse_interval};
pub use id::{MonitorId, RunId, ShortId, UserId};
pub use resource::{ResourceKind, ResourceRecord};
pub use snapshot::{
    AuditEntry, PhaseSnapshot, RunSnapshot, StageKind, TaskResultSnapshot, TaskStageSnapshot,
    UserSnapshot, SYSTEM_USER,
};
pub use status::{PhaseStatus, RunStatus, TaskResultStatus, TaskStageStatus, UnknownStatus};
