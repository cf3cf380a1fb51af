// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The run poller: a two-state machine driven one tick at a time.
//!
//! ```text
//!   Active ──tick──► fetch run ──ok──► classify ──► refresh dependents
//!     ▲                 │                              │
//!     └──── failure ◄───┘                 final? ──────┴──► Stopped
//! ```
//!
//! `Stopped` is terminal. A failed run fetch leaves the snapshot untouched
//! and the poller active, unless the configured failure cap is reached.

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::fetcher::Fetcher;
use rw_adapters::{FetchError, ResourceAccess};
use rw_core::{ActionSet, RunId, RunSnapshot, RunStatus, StatusDescriptor};
use serde::Serialize;
use tracing::Instrument;

/// Why a poller stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The run reached a terminal status.
    Final,
    /// Too many consecutive run-fetch failures.
    FailureLimit,
    /// The backend reported a run status outside the known enumeration.
    UnknownStatus,
    /// The owner stopped the monitor.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PollerState {
    Active,
    Stopped { reason: StopReason },
}

impl PollerState {
    pub fn is_active(&self) -> bool {
        matches!(self, PollerState::Active)
    }
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The run was fetched and the snapshot replaced.
    Updated { status: RunStatus, changed: bool },
    /// The run fetch failed; the snapshot is unchanged.
    Failed { consecutive: u32, error: FetchError },
    /// The poller had already stopped; nothing was fetched.
    Skipped,
}

/// Consistent read-only view published after each tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunView {
    /// Number of ticks attempted so far.
    pub tick: u64,
    #[serde(flatten)]
    pub state: PollerState,
    /// Set after too many consecutive run-fetch failures.
    pub stale: bool,
    pub consecutive_failures: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<StatusDescriptor>,
    pub actions: ActionSet,
    pub snapshot: RunSnapshot,
}

impl RunView {
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self.state {
            PollerState::Active => None,
            PollerState::Stopped { reason } => Some(reason),
        }
    }
}

pub struct Poller<R> {
    pub(crate) fetcher: Fetcher<R>,
    config: MonitorConfig,
    snapshot: RunSnapshot,
    state: PollerState,
    consecutive_failures: u32,
    ticks: u64,
}

impl<R: ResourceAccess> Poller<R> {
    pub fn new(fetcher: Fetcher<R>, run_id: RunId, config: MonitorConfig) -> Self {
        Self {
            fetcher,
            config,
            snapshot: RunSnapshot::new(run_id),
            state: PollerState::Active,
            consecutive_failures: 0,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &RunSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn is_stale(&self) -> bool {
        self.config.is_stale(self.consecutive_failures)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn view(&self) -> RunView {
        RunView {
            tick: self.ticks,
            state: self.state,
            stale: self.is_stale(),
            consecutive_failures: self.consecutive_failures,
            descriptor: self.snapshot.descriptor(),
            actions: self.snapshot.available_actions(),
            snapshot: self.snapshot.clone(),
        }
    }

    /// Stop polling. Has no effect once already stopped.
    pub fn stop(&mut self, reason: StopReason) {
        if self.state.is_active() {
            tracing::info!(run_id = %self.snapshot.run_id, ?reason, "poller stopped");
            self.state = PollerState::Stopped { reason };
        }
    }

    /// Run one tick: fetch the run, classify it, refresh dependents.
    ///
    /// Only an unknown run status is an error; it also stops the poller.
    pub async fn tick(&mut self) -> Result<TickOutcome, MonitorError> {
        if !self.state.is_active() {
            return Ok(TickOutcome::Skipped);
        }
        self.ticks += 1;
        let span = tracing::info_span!("tick", run_id = %self.snapshot.run_id, tick = self.ticks);
        self.poll_once().instrument(span).await
    }

    async fn poll_once(&mut self) -> Result<TickOutcome, MonitorError> {
        let record = match self.fetcher.fetch_run(&self.snapshot.run_id).await {
            Ok(record) => record,
            Err(e) => return Ok(self.record_failure(e)),
        };
        let Some(code) = record.status() else {
            return Ok(self.record_failure(FetchError::Decode("run has no status".to_string())));
        };
        let status = match RunStatus::parse(code) {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(error = %e, "backend reported an unknown run status");
                self.stop(StopReason::UnknownStatus);
                return Err(e.into());
            }
        };

        let mut next = self.snapshot.clone();
        let changed = next.record_status(status);
        let descriptor = status.descriptor();
        if changed {
            tracing::info!(
                from = next.previous_status.map(|s| s.as_str()),
                to = status.as_str(),
                "run status changed"
            );
        }
        self.fetcher
            .refresh(&mut next, &record, &descriptor, changed)
            .await;

        self.snapshot = next;
        self.consecutive_failures = 0;
        if descriptor.is_final {
            self.stop(StopReason::Final);
        }
        Ok(TickOutcome::Updated { status, changed })
    }

    fn record_failure(&mut self, error: FetchError) -> TickOutcome {
        self.consecutive_failures += 1;
        let consecutive = self.consecutive_failures;
        tracing::warn!(consecutive, error = %error, "run fetch failed");
        if self.config.is_stale(consecutive) {
            tracing::warn!(consecutive, "run data is stale");
        }
        if self.config.failure_limit_reached(consecutive) {
            self.stop(StopReason::FailureLimit);
        }
        TickOutcome::Failed { consecutive, error }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
