// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory aggregate state of one monitored run.
//!
//! A [`RunSnapshot`] is owned by exactly one poller for the lifetime of a
//! monitoring session and is never persisted.

use crate::action::{available_actions, Action, ActionSet};
use crate::descriptor::{Badge, ColorClass, StatusDescriptor};
use crate::id::{RunId, UserId};
use crate::status::{PhaseStatus, RunStatus, TaskResultStatus, TaskStageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Label used for audit events that carry no acting user.
pub const SYSTEM_USER: &str = "system";

/// Checkpoint at which a task stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    PrePlan,
    PostPlan,
    PreApply,
}

impl StageKind {
    pub const ALL: [StageKind; 3] = [StageKind::PrePlan, StageKind::PostPlan, StageKind::PreApply];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::PrePlan => "pre_plan",
            StageKind::PostPlan => "post_plan",
            StageKind::PreApply => "pre_apply",
        }
    }

    /// Parse the backend's stage kind; `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pre_plan" => Some(StageKind::PrePlan),
            "post_plan" => Some(StageKind::PostPlan),
            "pre_apply" => Some(StageKind::PreApply),
            _ => None,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plan or apply phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSnapshot {
    pub id: String,
    pub status: PhaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_text: Option<String>,
}

impl PhaseSnapshot {
    pub fn badge(&self) -> Badge {
        self.status.badge()
    }
}

/// Outcome of one external task within a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResultSnapshot {
    pub id: String,
    pub status: TaskResultStatus,
    pub color: ColorClass,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub task_name: String,
}

impl TaskResultSnapshot {
    pub fn new(
        id: impl Into<String>,
        status: TaskResultStatus,
        message: impl Into<String>,
        task_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            color: status.badge().color,
            message: message.into(),
            task_name: task_name.into(),
        }
    }
}

/// A task stage with its results in backend order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStageSnapshot {
    pub id: String,
    pub kind: StageKind,
    pub status: TaskStageStatus,
    pub color: ColorClass,
    #[serde(default)]
    pub results: Vec<TaskResultSnapshot>,
}

impl TaskStageSnapshot {
    pub fn new(id: impl Into<String>, kind: StageKind, status: TaskStageStatus) -> Self {
        Self {
            id: id.into(),
            kind,
            status,
            color: status.badge().color,
            results: Vec::new(),
        }
    }

    /// Shown once the stage has left `pending` and produced at least one result.
    pub fn visible(&self) -> bool {
        self.status != TaskStageStatus::Pending && !self.results.is_empty()
    }
}

/// Resolved platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: UserId,
    pub username: String,
}

/// One translated audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub description: String,
    /// Timestamp as reported by the backend.
    pub timestamp: String,
    /// Parsed timestamp, when the backend value is RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
    pub user: String,
}

impl AuditEntry {
    pub fn new(description: impl Into<String>, timestamp: impl Into<String>, user: impl Into<String>) -> Self {
        let timestamp = timestamp.into();
        let at = DateTime::parse_from_rfc3339(&timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc));
        Self {
            description: description.into(),
            timestamp,
            at,
            user: user.into(),
        }
    }
}

/// Aggregate state of one monitored run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub run_id: RunId,
    /// Last successfully fetched status (`None` before the first fetch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RunStatus>,
    /// Status seen on the previous successful fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<RunStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<PhaseSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply: Option<PhaseSnapshot>,
    #[serde(default)]
    pub task_stages: BTreeMap<StageKind, TaskStageSnapshot>,
    /// Stage ids fetched at least once. Only grows.
    #[serde(default)]
    pub known_task_stage_ids: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserSnapshot>,
    #[serde(default)]
    pub audit_events: Vec<AuditEntry>,
}

impl RunSnapshot {
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            status: None,
            previous_status: None,
            plan: None,
            apply: None,
            task_stages: BTreeMap::new(),
            known_task_stage_ids: BTreeSet::new(),
            created_by_user_id: None,
            created_by: None,
            audit_events: Vec::new(),
        }
    }

    /// Descriptor of the current status, recomputed on every call.
    pub fn descriptor(&self) -> Option<StatusDescriptor> {
        self.status.map(RunStatus::descriptor)
    }

    /// True once the run has reached a terminal status.
    pub fn is_final(&self) -> bool {
        self.descriptor().is_some_and(|d| d.is_final)
    }

    /// Record a freshly fetched status. Returns true when it differs from
    /// the previously known status (including the very first fetch).
    pub fn record_status(&mut self, status: RunStatus) -> bool {
        self.previous_status = self.status;
        self.status = Some(status);
        self.previous_status != Some(status)
    }

    /// Remember a stage id. Returns true if it was new.
    pub fn remember_stage(&mut self, stage_id: &str) -> bool {
        self.known_task_stage_ids.insert(stage_id.to_string())
    }

    pub fn is_known_stage(&self, stage_id: &str) -> bool {
        self.known_task_stage_ids.contains(stage_id)
    }

    pub fn stage(&self, kind: StageKind) -> Option<&TaskStageSnapshot> {
        self.task_stages.get(&kind)
    }

    /// Actions currently valid (empty before the first fetch).
    pub fn available_actions(&self) -> ActionSet {
        self.descriptor()
            .map(|d| available_actions(&d))
            .unwrap_or_default()
    }

    pub fn can(&self, action: Action) -> bool {
        self.available_actions().contains(action)
    }

    pub fn can_apply(&self) -> bool {
        self.can(Action::Apply)
    }

    pub fn can_cancel(&self) -> bool {
        self.can(Action::Cancel)
    }

    pub fn can_discard(&self) -> bool {
        self.can(Action::Discard)
    }

    pub fn can_retry(&self) -> bool {
        self.can(Action::Retry)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
