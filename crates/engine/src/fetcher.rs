// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependent-resource fetching.
//!
//! After each successful run fetch the fetcher decides which related
//! resources are worth re-reading and folds the results into the snapshot:
//!
//! - plan/apply: only when the run links one and either the status just
//!   changed or the phase is actively running (plus its log, best effort)
//! - creator: once per run, through the process-wide [`UserCache`]
//! - task stages: each stage independently; known stages are skipped while
//!   no stage is running and the status is unchanged
//! - audit events: every time, replacing the previous list
//!
//! Dependent failures never propagate. The slot keeps its previous value
//! and a warning is logged.

use crate::audit;
use crate::user_cache::UserCache;
use futures_util::future::join_all;
use rw_adapters::{FetchError, ResourceAccess, RunContext};
use rw_core::resource::{attr, rel};
use rw_core::{
    AuditEntry, PhaseSnapshot, PhaseStatus, RecheckFlags, ResourceKind, ResourceRecord, RunId,
    RunSnapshot, StageKind, StatusDescriptor, TaskResultSnapshot, TaskResultStatus,
    TaskStageSnapshot, TaskStageStatus, UserId, UserSnapshot,
};
use std::future::Future;
use std::time::Duration;

/// Outcome of fetching one task stage.
struct FetchedStage {
    id: String,
    /// New slot contents, when the slot should change.
    update: Option<TaskStageSnapshot>,
}

/// Reads a run's dependent resources for one monitor.
#[derive(Clone)]
pub struct Fetcher<R> {
    resources: R,
    ctx: RunContext,
    pub(crate) users: UserCache,
    timeout: Duration,
}

impl<R: ResourceAccess> Fetcher<R> {
    pub fn new(resources: R, ctx: RunContext, users: UserCache, timeout: Duration) -> Self {
        Self {
            resources,
            ctx,
            users,
            timeout,
        }
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    async fn timed<T>(
        &self,
        request: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        tokio::time::timeout(self.timeout, request)
            .await
            .unwrap_or(Err(FetchError::Timeout))
    }

    /// Fetch the run resource itself.
    pub async fn fetch_run(&self, run_id: &RunId) -> Result<ResourceRecord, FetchError> {
        self.timed(
            self.resources
                .fetch(&self.ctx, ResourceKind::Run, run_id.as_str()),
        )
        .await
    }

    /// Fetch whatever the new run state calls for and fold it into `snapshot`.
    ///
    /// Sibling fetches run concurrently; the snapshot is only written after
    /// all of them have finished.
    pub async fn refresh(
        &self,
        snapshot: &mut RunSnapshot,
        run: &ResourceRecord,
        descriptor: &StatusDescriptor,
        state_changed: bool,
    ) {
        let recheck = descriptor.recheck;
        let plan_id = phase_to_fetch(run, rel::PLAN, recheck.plan, state_changed);
        let apply_id = phase_to_fetch(run, rel::APPLY, recheck.apply, state_changed);

        let current: &RunSnapshot = snapshot;
        let (plan, apply, creator, stages, audit_events) = tokio::join!(
            self.fetch_phase(ResourceKind::Plan, plan_id),
            self.fetch_phase(ResourceKind::Apply, apply_id),
            self.resolve_creator(current, run),
            self.fetch_stages(current, run, recheck, state_changed),
            self.fetch_audit(&current.run_id),
        );

        if let Some(plan) = plan {
            merge_phase(&mut snapshot.plan, plan);
        }
        if let Some(apply) = apply {
            merge_phase(&mut snapshot.apply, apply);
        }
        if let Some((id, user)) = creator {
            snapshot.created_by_user_id = Some(id);
            if user.is_some() {
                snapshot.created_by = user;
            }
        }
        for stage in stages {
            snapshot.remember_stage(&stage.id);
            if let Some(update) = stage.update {
                snapshot.task_stages.insert(update.kind, update);
            }
        }
        if let Some(entries) = audit_events {
            snapshot.audit_events = entries;
        }
    }

    async fn fetch_phase(&self, kind: ResourceKind, id: Option<&str>) -> Option<PhaseSnapshot> {
        let id = id?;
        let record = match self.timed(self.resources.fetch(&self.ctx, kind, id)).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(%kind, id, error = %e, "keeping previous phase");
                return None;
            }
        };
        let status = match PhaseStatus::parse(record.status().unwrap_or_default()) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(%kind, id, error = %e, "keeping previous phase");
                return None;
            }
        };
        let log_url = record.attr_str(attr::LOG_READ_URL).map(str::to_string);
        let log_text = match &log_url {
            Some(url) => match self.timed(self.resources.fetch_log(url)).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(%kind, id, error = %e, "log fetch failed");
                    None
                }
            },
            None => None,
        };
        Some(PhaseSnapshot {
            id: record.id,
            status,
            log_url,
            log_text,
        })
    }

    /// Resolve the run's creator unless it is already known.
    async fn resolve_creator(
        &self,
        snapshot: &RunSnapshot,
        run: &ResourceRecord,
    ) -> Option<(UserId, Option<UserSnapshot>)> {
        let id = UserId::new(run.relationship(rel::CREATED_BY)?);
        if snapshot.created_by.as_ref().is_some_and(|u| u.id == id) {
            return None;
        }
        let user = match self
            .timed(self.users.resolve(&self.resources, &self.ctx, &id))
            .await
        {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "creator lookup failed");
                None
            }
        };
        Some((id, user))
    }

    async fn fetch_stages(
        &self,
        snapshot: &RunSnapshot,
        run: &ResourceRecord,
        recheck: RecheckFlags,
        state_changed: bool,
    ) -> Vec<FetchedStage> {
        let wanted = run.relationships(rel::TASK_STAGES).iter().filter(|id| {
            let skip = snapshot.is_known_stage(id) && !recheck.any_stage() && !state_changed;
            if skip {
                tracing::debug!(stage_id = %id, "task stage unchanged, skipping");
            }
            !skip
        });
        join_all(wanted.map(|id| self.fetch_stage(snapshot, id, recheck, state_changed)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn fetch_stage(
        &self,
        snapshot: &RunSnapshot,
        id: &str,
        recheck: RecheckFlags,
        state_changed: bool,
    ) -> Option<FetchedStage> {
        let record = match self
            .timed(self.resources.fetch(&self.ctx, ResourceKind::TaskStage, id))
            .await
        {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(stage_id = id, error = %e, "task stage fetch failed");
                return None;
            }
        };
        let status = match TaskStageStatus::parse(record.status().unwrap_or_default()) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(stage_id = id, error = %e, "task stage fetch failed");
                return None;
            }
        };
        let Some(kind) = record.attr_str(attr::STAGE).and_then(StageKind::parse) else {
            tracing::warn!(
                stage_id = id,
                stage = ?record.attr_str(attr::STAGE),
                "unrecognized task stage kind, ignoring"
            );
            return Some(FetchedStage {
                id: id.to_string(),
                update: None,
            });
        };

        let previous = snapshot.stage(kind).filter(|s| s.id == id);
        let needs_update = previous.is_none() || recheck.stage(kind) || state_changed;
        if !needs_update {
            return Some(FetchedStage {
                id: id.to_string(),
                update: None,
            });
        }

        let results = join_all(
            record
                .relationships(rel::TASK_RESULTS)
                .iter()
                .map(|result_id| self.fetch_result(result_id, previous)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        let mut stage = TaskStageSnapshot::new(id, kind, status);
        stage.results = results;
        Some(FetchedStage {
            id: id.to_string(),
            update: Some(stage),
        })
    }

    /// Fetch one task result; on failure fall back to the previous copy.
    async fn fetch_result(
        &self,
        id: &str,
        previous: Option<&TaskStageSnapshot>,
    ) -> Option<TaskResultSnapshot> {
        let fetched = self
            .timed(self.resources.fetch(&self.ctx, ResourceKind::TaskResult, id))
            .await
            .and_then(|record| {
                let status = TaskResultStatus::parse(record.status().unwrap_or_default())
                    .map_err(|e| FetchError::Decode(e.to_string()))?;
                Ok(TaskResultSnapshot::new(
                    record.id.clone(),
                    status,
                    record.attr_str(attr::MESSAGE).unwrap_or_default(),
                    record.attr_str(attr::TASK_NAME).unwrap_or_default(),
                ))
            });
        match fetched {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!(result_id = id, error = %e, "task result fetch failed");
                previous.and_then(|stage| stage.results.iter().find(|r| r.id == id).cloned())
            }
        }
    }

    async fn fetch_audit(&self, run_id: &RunId) -> Option<Vec<AuditEntry>> {
        match self
            .timed(self.resources.fetch_audit_events(&self.ctx, run_id))
            .await
        {
            Ok(events) => Some(
                audit::translate(&self.resources, &self.ctx, &self.users, self.timeout, &events)
                    .await,
            ),
            Err(e) => {
                tracing::warn!(run_id = %run_id, error = %e, "keeping previous audit events");
                None
            }
        }
    }
}

/// Phase id to fetch this tick, if any.
fn phase_to_fetch<'a>(
    run: &'a ResourceRecord,
    relationship: &str,
    recheck: bool,
    state_changed: bool,
) -> Option<&'a str> {
    let id = run.relationship(relationship)?;
    if recheck || state_changed {
        Some(id)
    } else {
        tracing::debug!(relationship, id, "phase unchanged, skipping");
        None
    }
}

/// Replace a phase slot, keeping the old log text when this fetch got none.
fn merge_phase(slot: &mut Option<PhaseSnapshot>, mut fresh: PhaseSnapshot) {
    if fresh.log_text.is_none() {
        if let Some(previous) = slot.take().filter(|p| p.id == fresh.id) {
            fresh.log_text = previous.log_text;
        }
    }
    *slot = Some(fresh);
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
