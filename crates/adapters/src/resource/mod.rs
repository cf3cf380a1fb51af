// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource access: reading runs and their related resources from the backend.
//!
//! The monitor only sees [`ResourceRecord`]s. How they travel over the wire
//! (JSON:API over HTTP for the production adapter) stays inside the adapter.
//!
//! # Call shape
//!
//! ```text
//! fetch(run)                      every tick
//!   ├── fetch(plan) / fetch(apply) ── fetch_log(log-read-url)
//!   ├── fetch(task-stage) ── fetch(task-result) ...
//!   ├── fetch(user)                 once per user id
//!   └── fetch_audit_events(run)     every tick
//! post_action(run, "apply" | "cancel" | "discard" | "force-cancel")
//! ```

mod http;
mod jsonapi;

pub use http::{HttpConfig, HttpResourceAccess};
pub use jsonapi::{decode_collection, decode_document};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeResourceAccess, ResourceCall};

use async_trait::async_trait;
use rw_core::{ResourceKind, ResourceRecord, RunId};
use thiserror::Error;

/// Errors from resource access operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request to {url} failed with HTTP {code}")]
    Status { code: u16, url: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("request timed out")]
    Timeout,
}

/// Organisation and workspace a run belongs to.
///
/// Passed explicitly on every call instead of being read from shared state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunContext {
    pub organization: String,
    pub workspace: String,
}

impl RunContext {
    pub fn new(organization: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            workspace: workspace.into(),
        }
    }
}

/// Adapter for reading resources from, and posting actions to, the backend
#[async_trait]
pub trait ResourceAccess: Clone + Send + Sync + 'static {
    /// Fetch one resource by kind and id.
    async fn fetch(
        &self,
        ctx: &RunContext,
        kind: ResourceKind,
        id: &str,
    ) -> Result<ResourceRecord, FetchError>;

    /// Fetch the audit events of a run, oldest first.
    async fn fetch_audit_events(
        &self,
        ctx: &RunContext,
        run_id: &RunId,
    ) -> Result<Vec<ResourceRecord>, FetchError>;

    /// Fetch a plan/apply log as text.
    async fn fetch_log(&self, url: &str) -> Result<String, FetchError>;

    /// Post a run action (`apply`, `cancel`, `discard`, `force-cancel`).
    async fn post_action(
        &self,
        ctx: &RunContext,
        run_id: &RunId,
        action: &str,
    ) -> Result<(), FetchError>;
}
