// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake resource access for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{FetchError, ResourceAccess, RunContext};
use async_trait::async_trait;
use parking_lot::Mutex;
use rw_core::{ResourceKind, ResourceRecord, RunId};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

/// Recorded resource access call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceCall {
    Fetch { kind: ResourceKind, id: String },
    AuditEvents { run_id: String },
    Log { url: String },
    Action { run_id: String, action: String },
}

/// Scripted responses. A queue with more than one entry is consumed one
/// entry per call; the last entry answers every call after that.
type Script<T> = VecDeque<Result<T, FetchError>>;

#[derive(Default)]
struct FakeResourceState {
    records: HashMap<(ResourceKind, String), Script<ResourceRecord>>,
    audit_events: Script<Vec<ResourceRecord>>,
    logs: HashMap<String, Result<String, FetchError>>,
    rejected_actions: HashMap<String, FetchError>,
    latency: HashMap<ResourceKind, Duration>,
    calls: Vec<ResourceCall>,
}

fn next<T: Clone>(script: &mut Script<T>) -> Option<Result<T, FetchError>> {
    if script.len() > 1 {
        script.pop_front()
    } else {
        script.front().cloned()
    }
}

fn not_found(what: &str) -> FetchError {
    FetchError::Status {
        code: 404,
        url: format!("fake://{what}"),
    }
}

/// Fake resource access for testing
#[derive(Clone, Default)]
pub struct FakeResourceAccess {
    inner: Arc<Mutex<FakeResourceState>>,
}

impl FakeResourceAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every fetch of this record's kind and id with the record.
    pub fn set(&self, record: ResourceRecord) {
        let key = (record.kind, record.id.clone());
        self.inner
            .lock()
            .records
            .insert(key, VecDeque::from([Ok(record)]));
    }

    /// Queue one more response for this record's kind and id.
    pub fn push(&self, record: ResourceRecord) {
        let key = (record.kind, record.id.clone());
        self.inner
            .lock()
            .records
            .entry(key)
            .or_default()
            .push_back(Ok(record));
    }

    /// Queue a failure for the given kind and id.
    pub fn push_error(&self, kind: ResourceKind, id: &str, error: FetchError) {
        self.inner
            .lock()
            .records
            .entry((kind, id.to_string()))
            .or_default()
            .push_back(Err(error));
    }

    /// Answer every fetch of the given kind and id with a failure.
    pub fn fail(&self, kind: ResourceKind, id: &str, error: FetchError) {
        self.inner
            .lock()
            .records
            .insert((kind, id.to_string()), VecDeque::from([Err(error)]));
    }

    pub fn set_audit_events(&self, events: Vec<ResourceRecord>) {
        self.inner.lock().audit_events = VecDeque::from([Ok(events)]);
    }

    pub fn push_audit_events(&self, events: Result<Vec<ResourceRecord>, FetchError>) {
        self.inner.lock().audit_events.push_back(events);
    }

    pub fn set_log(&self, url: &str, text: &str) {
        self.inner
            .lock()
            .logs
            .insert(url.to_string(), Ok(text.to_string()));
    }

    pub fn fail_log(&self, url: &str, error: FetchError) {
        self.inner.lock().logs.insert(url.to_string(), Err(error));
    }

    /// Make the backend reject an action.
    pub fn reject_action(&self, action: &str, error: FetchError) {
        self.inner
            .lock()
            .rejected_actions
            .insert(action.to_string(), error);
    }

    /// Delay every fetch of the given kind. The call is recorded before
    /// the delay starts.
    pub fn set_latency(&self, kind: ResourceKind, latency: Duration) {
        self.inner.lock().latency.insert(kind, latency);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ResourceCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of fetches issued for a kind and id.
    pub fn fetch_count(&self, kind: ResourceKind, id: &str) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, ResourceCall::Fetch { kind: k, id: i } if *k == kind && i == id))
            .count()
    }

    /// Number of fetches issued for a kind, any id.
    pub fn kind_count(&self, kind: ResourceKind) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, ResourceCall::Fetch { kind: k, .. } if *k == kind))
            .count()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }
}

#[async_trait]
impl ResourceAccess for FakeResourceAccess {
    async fn fetch(
        &self,
        _ctx: &RunContext,
        kind: ResourceKind,
        id: &str,
    ) -> Result<ResourceRecord, FetchError> {
        let latency = {
            let mut state = self.inner.lock();
            state.calls.push(ResourceCall::Fetch {
                kind,
                id: id.to_string(),
            });
            state.latency.get(&kind).copied()
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.inner
            .lock()
            .records
            .get_mut(&(kind, id.to_string()))
            .and_then(next)
            .unwrap_or_else(|| Err(not_found(&format!("{kind}/{id}"))))
    }

    async fn fetch_audit_events(
        &self,
        _ctx: &RunContext,
        run_id: &RunId,
    ) -> Result<Vec<ResourceRecord>, FetchError> {
        let mut state = self.inner.lock();
        state.calls.push(ResourceCall::AuditEvents {
            run_id: run_id.to_string(),
        });
        next(&mut state.audit_events).unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_log(&self, url: &str) -> Result<String, FetchError> {
        let mut state = self.inner.lock();
        state.calls.push(ResourceCall::Log {
            url: url.to_string(),
        });
        state
            .logs
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(not_found(url)))
    }

    async fn post_action(
        &self,
        _ctx: &RunContext,
        run_id: &RunId,
        action: &str,
    ) -> Result<(), FetchError> {
        let mut state = self.inner.lock();
        state.calls.push(ResourceCall::Action {
            run_id: run_id.to_string(),
            action: action.to_string(),
        });
        match state.rejected_actions.get(action) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
