// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status classification: status code -> presentation and polling metadata.
//!
//! The mapping is a single exhaustive match per enumeration, so adding a
//! status without describing it is a compile error. Classification is pure
//! and the returned values are `Copy`; callers may classify freely on every
//! poll tick.

use crate::action::{Action, ActionSet};
use crate::snapshot::StageKind;
use crate::status::{PhaseStatus, RunStatus, TaskResultStatus, TaskStageStatus, UnknownStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation color class of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    /// Idle or waiting in a queue
    Default,
    /// Actively running
    Processing,
    Success,
    /// Waiting on a human decision
    Warning,
    Error,
    /// Stopped without a result (discarded, canceled)
    Muted,
}

impl ColorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorClass::Default => "default",
            ColorClass::Processing => "processing",
            ColorClass::Success => "success",
            ColorClass::Warning => "warning",
            ColorClass::Error => "error",
            ColorClass::Muted => "muted",
        }
    }
}

impl fmt::Display for ColorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which detail resources must be re-fetched on every tick while the run
/// stays in this status, even when the status itself has not changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RecheckFlags {
    pub pre_plan: bool,
    pub plan: bool,
    pub post_plan: bool,
    pub pre_apply: bool,
    pub apply: bool,
}

impl RecheckFlags {
    pub const NONE: RecheckFlags = RecheckFlags {
        pre_plan: false,
        plan: false,
        post_plan: false,
        pre_apply: false,
        apply: false,
    };

    /// True when any task stage is actively running.
    pub fn any_stage(&self) -> bool {
        self.pre_plan || self.post_plan || self.pre_apply
    }

    /// Re-check flag for the given task stage slot.
    pub fn stage(&self, kind: StageKind) -> bool {
        match kind {
            StageKind::PrePlan => self.pre_plan,
            StageKind::PostPlan => self.post_plan,
            StageKind::PreApply => self.pre_apply,
        }
    }
}

/// Derived metadata for one run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StatusDescriptor {
    pub status: RunStatus,
    pub display_name: &'static str,
    pub color: ColorClass,
    pub icon: &'static str,
    /// Terminal: the run never leaves this status.
    pub is_final: bool,
    pub actions: ActionSet,
    pub recheck: RecheckFlags,
}

/// Display metadata for plan/apply phases, task stages and task results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Badge {
    pub display_name: &'static str,
    pub color: ColorClass,
    pub icon: &'static str,
    pub is_final: bool,
}

/// Alias kept for plan/apply call sites.
pub type PhaseDescriptor = Badge;

const NO_ACTIONS: ActionSet = ActionSet::EMPTY;
const CANCEL: ActionSet = ActionSet::of(&[Action::Cancel]);
const CONFIRM: ActionSet = ActionSet::of(&[Action::Apply, Action::Discard]);
const OVERRIDE: ActionSet = ActionSet::of(&[Action::OverrideAndContinue]);
const OVERRIDE_OR_DISCARD: ActionSet =
    ActionSet::of(&[Action::OverrideAndContinue, Action::Discard]);
const RETRY: ActionSet = ActionSet::of(&[Action::Retry]);
const FORCE_CANCEL: ActionSet = ActionSet::of(&[Action::ForceCancel]);

const fn idle(status: RunStatus, display_name: &'static str, icon: &'static str) -> StatusDescriptor {
    StatusDescriptor {
        status,
        display_name,
        color: ColorClass::Default,
        icon,
        is_final: false,
        actions: NO_ACTIONS,
        recheck: RecheckFlags::NONE,
    }
}

const fn running(
    status: RunStatus,
    display_name: &'static str,
    recheck: RecheckFlags,
) -> StatusDescriptor {
    StatusDescriptor {
        status,
        display_name,
        color: ColorClass::Processing,
        icon: "sync",
        is_final: false,
        actions: CANCEL,
        recheck,
    }
}

const fn awaiting(
    status: RunStatus,
    display_name: &'static str,
    actions: ActionSet,
) -> StatusDescriptor {
    StatusDescriptor {
        status,
        display_name,
        color: ColorClass::Warning,
        icon: "exclamation-circle",
        is_final: false,
        actions,
        recheck: RecheckFlags::NONE,
    }
}

const fn terminal(
    status: RunStatus,
    display_name: &'static str,
    color: ColorClass,
    icon: &'static str,
    actions: ActionSet,
) -> StatusDescriptor {
    StatusDescriptor {
        status,
        display_name,
        color,
        icon,
        is_final: true,
        actions,
        recheck: RecheckFlags::NONE,
    }
}

const fn recheck_plan() -> RecheckFlags {
    let mut flags = RecheckFlags::NONE;
    flags.plan = true;
    flags
}

const fn recheck_apply() -> RecheckFlags {
    let mut flags = RecheckFlags::NONE;
    flags.apply = true;
    flags
}

const fn recheck_stage(kind: StageKind) -> RecheckFlags {
    let mut flags = RecheckFlags::NONE;
    match kind {
        StageKind::PrePlan => flags.pre_plan = true,
        StageKind::PostPlan => flags.post_plan = true,
        StageKind::PreApply => flags.pre_apply = true,
    }
    flags
}

impl RunStatus {
    /// The descriptor for this status. Total over the enumeration.
    pub const fn descriptor(self) -> StatusDescriptor {
        use RunStatus::*;
        match self {
            Pending => idle(Pending, "Pending", "clock-circle"),
            PrePlanRunning => running(
                PrePlanRunning,
                "Pre-plan running",
                recheck_stage(StageKind::PrePlan),
            ),
            PrePlanCompleted => idle(PrePlanCompleted, "Pre-plan completed", "check-circle"),
            Queuing => idle(Queuing, "Queuing", "clock-circle"),
            PlanQueued => StatusDescriptor {
                actions: CANCEL,
                ..idle(PlanQueued, "Plan queued", "clock-circle")
            },
            Planning => running(Planning, "Planning", recheck_plan()),
            Planned => awaiting(Planned, "Needs confirmation", CONFIRM),
            PolicyChecking => running(PolicyChecking, "Policy checking", RecheckFlags::NONE),
            PolicyOverride => awaiting(PolicyOverride, "Policy override", OVERRIDE_OR_DISCARD),
            PolicySoftFailed => awaiting(PolicySoftFailed, "Policy soft failed", OVERRIDE),
            PolicyChecked => awaiting(PolicyChecked, "Policy checked", CONFIRM),
            Confirmed => idle(Confirmed, "Confirmed", "check-circle"),
            PostPlanRunning => running(
                PostPlanRunning,
                "Post-plan running",
                recheck_stage(StageKind::PostPlan),
            ),
            PostPlanCompleted => awaiting(PostPlanCompleted, "Post-plan completed", CONFIRM),
            PlannedAndFinished => terminal(
                PlannedAndFinished,
                "Planned and finished",
                ColorClass::Success,
                "check-circle",
                RETRY,
            ),
            ApplyQueued => StatusDescriptor {
                actions: CANCEL,
                ..idle(ApplyQueued, "Apply queued", "clock-circle")
            },
            PreApplyRunning => running(
                PreApplyRunning,
                "Pre-apply running",
                recheck_stage(StageKind::PreApply),
            ),
            PreApplyCompleted => idle(PreApplyCompleted, "Pre-apply completed", "check-circle"),
            Applying => running(Applying, "Applying", recheck_apply()),
            Applied => terminal(Applied, "Applied", ColorClass::Success, "check-circle", RETRY),
            Discarded => terminal(Discarded, "Discarded", ColorClass::Muted, "minus-circle", RETRY),
            Errored => terminal(Errored, "Errored", ColorClass::Error, "close-circle", RETRY),
            Canceled => terminal(Canceled, "Canceled", ColorClass::Muted, "stop", FORCE_CANCEL),
            ForceCanceled => terminal(
                ForceCanceled,
                "Force canceled",
                ColorClass::Muted,
                "stop",
                RETRY,
            ),
        }
    }
}

/// Classify a raw run status code.
///
/// Fails with [`UnknownStatus`] for any code outside the run enumeration.
pub fn classify(code: &str) -> Result<StatusDescriptor, UnknownStatus> {
    RunStatus::parse(code).map(RunStatus::descriptor)
}

const fn badge(
    display_name: &'static str,
    color: ColorClass,
    icon: &'static str,
    is_final: bool,
) -> Badge {
    Badge {
        display_name,
        color,
        icon,
        is_final,
    }
}

impl PhaseStatus {
    pub const fn badge(self) -> Badge {
        use PhaseStatus::*;
        match self {
            Pending => badge("Pending", ColorClass::Default, "clock-circle", false),
            ManagedQueued => badge("Queued", ColorClass::Default, "clock-circle", false),
            Queued => badge("Queued", ColorClass::Default, "clock-circle", false),
            Running => badge("Running", ColorClass::Processing, "sync", false),
            Finished => badge("Finished", ColorClass::Success, "check-circle", true),
            Errored => badge("Errored", ColorClass::Error, "close-circle", true),
            Canceled => badge("Canceled", ColorClass::Muted, "stop", true),
            Unreachable => badge("Unreachable", ColorClass::Muted, "minus-circle", true),
        }
    }
}

impl TaskStageStatus {
    pub const fn badge(self) -> Badge {
        use TaskStageStatus::*;
        match self {
            Pending => badge("Pending", ColorClass::Default, "clock-circle", false),
            Running => badge("Running", ColorClass::Processing, "sync", false),
            Passed => badge("Passed", ColorClass::Success, "check-circle", true),
            Failed => badge("Failed", ColorClass::Error, "close-circle", true),
            AwaitingOverride => {
                badge("Awaiting override", ColorClass::Warning, "pause-circle", false)
            }
            Canceled => badge("Canceled", ColorClass::Muted, "stop", true),
            Errored => badge("Errored", ColorClass::Error, "close-circle", true),
            Unreachable => badge("Unreachable", ColorClass::Muted, "minus-circle", true),
        }
    }
}

impl TaskResultStatus {
    pub const fn badge(self) -> Badge {
        use TaskResultStatus::*;
        match self {
            Pending => badge("Pending", ColorClass::Default, "clock-circle", false),
            Running => badge("Running", ColorClass::Processing, "sync", false),
            Passed => badge("Passed", ColorClass::Success, "check-circle", true),
            Failed => badge("Failed", ColorClass::Error, "close-circle", true),
            Errored => badge("Errored", ColorClass::Error, "close-circle", true),
            Canceled => badge("Canceled", ColorClass::Muted, "stop", true),
            Unreachable => badge("Unreachable", ColorClass::Muted, "minus-circle", true),
        }
    }
}

/// Classify a raw plan/apply status code.
pub fn classify_phase(code: &str) -> Result<Badge, UnknownStatus> {
    PhaseStatus::parse(code).map(PhaseStatus::badge)
}

/// Classify a raw task stage status code.
pub fn classify_stage(code: &str) -> Result<Badge, UnknownStatus> {
    TaskStageStatus::parse(code).map(TaskStageStatus::badge)
}

/// Classify a raw task result status code.
pub fn classify_result(code: &str) -> Result<Badge, UnknownStatus> {
    TaskResultStatus::parse(code).map(TaskResultStatus::badge)
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
