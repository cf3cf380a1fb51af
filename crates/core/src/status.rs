// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status code enumerations reported by the backend.
//!
//! Every enumeration is closed: parsing a code outside it yields
//! [`UnknownStatus`] instead of a default, so schema drift on the backend
//! surfaces at the first classification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A status code that is not part of the expected enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {family} status: {code:?}")]
pub struct UnknownStatus {
    /// Which enumeration rejected the code (e.g. `"run"`, `"phase"`).
    pub family: &'static str,
    pub code: String,
}

/// Define a closed string enumeration with `ALL`, `as_str()`, `parse()`,
/// `Display` and `FromStr`.
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($family:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant, )+
        }

        impl $name {
            /// Every code in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Wire code for this status.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            /// Parse a wire code, failing on anything outside the enumeration.
            pub fn parse(code: &str) -> Result<Self, UnknownStatus> {
                match code {
                    $( $code => Ok($name::$variant), )+
                    other => Err(UnknownStatus {
                        family: $family,
                        code: other.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

status_enum! {
    /// Status of a run as a whole.
    pub enum RunStatus ("run") {
        Pending => "pending",
        PrePlanRunning => "pre_plan_running",
        PrePlanCompleted => "pre_plan_completed",
        Queuing => "queuing",
        PlanQueued => "plan_queued",
        Planning => "planning",
        /// Plan finished and awaits confirmation
        Planned => "planned",
        PolicyChecking => "policy_checking",
        /// A mandatory policy failed; an override is required
        PolicyOverride => "policy_override",
        PolicySoftFailed => "policy_soft_failed",
        PolicyChecked => "policy_checked",
        Confirmed => "confirmed",
        PostPlanRunning => "post_plan_running",
        PostPlanCompleted => "post_plan_completed",
        /// Plan-only run (or no changes) finished
        PlannedAndFinished => "planned_and_finished",
        ApplyQueued => "apply_queued",
        PreApplyRunning => "pre_apply_running",
        PreApplyCompleted => "pre_apply_completed",
        Applying => "applying",
        Applied => "applied",
        Discarded => "discarded",
        Errored => "errored",
        Canceled => "canceled",
        ForceCanceled => "force_canceled",
    }
}

status_enum! {
    /// Status of a plan or apply phase.
    pub enum PhaseStatus ("phase") {
        Pending => "pending",
        ManagedQueued => "managed_queued",
        Queued => "queued",
        Running => "running",
        Finished => "finished",
        Errored => "errored",
        Canceled => "canceled",
        Unreachable => "unreachable",
    }
}

status_enum! {
    /// Status of a task stage.
    pub enum TaskStageStatus ("task stage") {
        Pending => "pending",
        Running => "running",
        Passed => "passed",
        Failed => "failed",
        AwaitingOverride => "awaiting_override",
        Canceled => "canceled",
        Errored => "errored",
        Unreachable => "unreachable",
    }
}

status_enum! {
    /// Status of a single task result within a stage.
    pub enum TaskResultStatus ("task result") {
        Pending => "pending",
        Running => "running",
        Passed => "passed",
        Failed => "failed",
        Errored => "errored",
        Canceled => "canceled",
        Unreachable => "unreachable",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
