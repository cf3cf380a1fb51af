// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire-agnostic view of a backend resource.
//!
//! The resource access layer decodes whatever the backend sends into a
//! [`ResourceRecord`]; the monitor only reads ids, attributes, and
//! relationship ids from it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kind of resource the monitor reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Run,
    Plan,
    Apply,
    TaskStage,
    TaskResult,
    User,
    AuditEvent,
}

impl ResourceKind {
    /// Plural collection name used in resource paths.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Run => "runs",
            ResourceKind::Plan => "plans",
            ResourceKind::Apply => "applies",
            ResourceKind::TaskStage => "task-stages",
            ResourceKind::TaskResult => "task-results",
            ResourceKind::User => "users",
            ResourceKind::AuditEvent => "run-events",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Run => write!(f, "run"),
            ResourceKind::Plan => write!(f, "plan"),
            ResourceKind::Apply => write!(f, "apply"),
            ResourceKind::TaskStage => write!(f, "task-stage"),
            ResourceKind::TaskResult => write!(f, "task-result"),
            ResourceKind::User => write!(f, "user"),
            ResourceKind::AuditEvent => write!(f, "audit-event"),
        }
    }
}

/// Relationship names the monitor follows.
pub mod rel {
    pub const PLAN: &str = "plan";
    pub const APPLY: &str = "apply";
    pub const CREATED_BY: &str = "created-by";
    pub const TASK_STAGES: &str = "task-stages";
    pub const TASK_RESULTS: &str = "task-results";
    pub const USER: &str = "user";
}

/// Attribute names the monitor reads.
pub mod attr {
    pub const STATUS: &str = "status";
    pub const LOG_READ_URL: &str = "log-read-url";
    pub const STAGE: &str = "stage";
    pub const MESSAGE: &str = "message";
    pub const TASK_NAME: &str = "task-name";
    pub const USERNAME: &str = "username";
    pub const ACTION: &str = "action";
    pub const NEW_STATUS: &str = "new-status";
    pub const DESCRIPTION: &str = "description";
    pub const CREATED_AT: &str = "created-at";
}

/// One decoded resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub id: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Relationship name -> referenced ids (empty for a null to-one).
    #[serde(default)]
    pub relationships: HashMap<String, Vec<String>>,
}

impl ResourceRecord {
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            attributes: serde_json::Map::new(),
            relationships: HashMap::new(),
        }
    }

    /// String attribute, if present and a string.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|v| v.as_str())
    }

    /// The `status` attribute.
    pub fn status(&self) -> Option<&str> {
        self.attr_str(attr::STATUS)
    }

    /// First id of a to-one relationship.
    pub fn relationship(&self, name: &str) -> Option<&str> {
        self.relationships
            .get(name)
            .and_then(|ids| ids.first())
            .map(String::as_str)
    }

    /// All ids of a to-many relationship (empty when absent).
    pub fn relationships(&self, name: &str) -> &[String] {
        self.relationships
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
