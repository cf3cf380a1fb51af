// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::resource::{attr, rel, ResourceKind, ResourceRecord};
use serde_json::Value;

/// Fluent builder for [`ResourceRecord`]s.
pub struct RecordBuilder {
    record: ResourceRecord,
}

impl RecordBuilder {
    pub fn new(kind: ResourceKind, id: &str) -> Self {
        Self {
            record: ResourceRecord::new(kind, id),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.record.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn status(self, status: &str) -> Self {
        self.attr(attr::STATUS, status)
    }

    pub fn rel(mut self, name: &str, ids: &[&str]) -> Self {
        self.record.relationships.insert(
            name.to_string(),
            ids.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn build(self) -> ResourceRecord {
        self.record
    }
}

// ── Record factory functions ────────────────────────────────────────────────

pub fn run(id: &str, status: &str) -> RecordBuilder {
    RecordBuilder::new(ResourceKind::Run, id).status(status)
}

pub fn plan(id: &str, status: &str) -> ResourceRecord {
    RecordBuilder::new(ResourceKind::Plan, id)
        .status(status)
        .attr(attr::LOG_READ_URL, format!("https://logs.test/{id}"))
        .build()
}

pub fn apply(id: &str, status: &str) -> ResourceRecord {
    RecordBuilder::new(ResourceKind::Apply, id)
        .status(status)
        .attr(attr::LOG_READ_URL, format!("https://logs.test/{id}"))
        .build()
}

pub fn task_stage(id: &str, stage: &str, status: &str, results: &[&str]) -> ResourceRecord {
    RecordBuilder::new(ResourceKind::TaskStage, id)
        .status(status)
        .attr(attr::STAGE, stage)
        .rel(rel::TASK_RESULTS, results)
        .build()
}

pub fn task_result(id: &str, status: &str, task_name: &str) -> ResourceRecord {
    RecordBuilder::new(ResourceKind::TaskResult, id)
        .status(status)
        .attr(attr::TASK_NAME, task_name)
        .attr(attr::MESSAGE, format!("{task_name}: {status}"))
        .build()
}

pub fn user(id: &str, username: &str) -> ResourceRecord {
    RecordBuilder::new(ResourceKind::User, id)
        .attr(attr::USERNAME, username)
        .build()
}

pub fn status_change(id: &str, new_status: &str, at: &str, user: Option<&str>) -> ResourceRecord {
    let builder = RecordBuilder::new(ResourceKind::AuditEvent, id)
        .attr(attr::ACTION, "status_change")
        .attr(attr::NEW_STATUS, new_status)
        .attr(attr::CREATED_AT, at);
    match user {
        Some(user_id) => builder.rel(rel::USER, &[user_id]).build(),
        None => builder.build(),
    }
}
