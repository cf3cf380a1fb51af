// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawned run monitor.
//!
//! Each monitor is one tokio task owning one [`Poller`]. Ticks are
//! serialized: the next tick starts `interval` after the previous one has
//! finished, so responses from different ticks never interleave. After
//! every tick the task publishes one [`RunView`] on a watch channel.
//!
//! Stopping the handle, or dropping it, ends the task. A tick that is in
//! flight at that moment is dropped and its result is never published.

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::fetcher::Fetcher;
use crate::poller::{Poller, PollerState, RunView, StopReason, TickOutcome};
use crate::user_cache::UserCache;
use rw_adapters::{ResourceAccess, RunContext};
use rw_core::{MonitorId, RunId};
use std::sync::Arc;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

/// A run monitor that has not been started yet.
pub struct RunMonitor<R> {
    poller: Poller<R>,
}

impl<R: ResourceAccess> RunMonitor<R> {
    /// Monitor `run_id`, resolving users through the process-wide cache.
    pub fn new(resources: R, ctx: RunContext, run_id: RunId, config: MonitorConfig) -> Self {
        let fetcher = Fetcher::new(resources, ctx, UserCache::shared(), config.request_timeout);
        Self {
            poller: Poller::new(fetcher, run_id, config),
        }
    }

    pub fn with_user_cache(mut self, users: UserCache) -> Self {
        self.poller.fetcher.users = users;
        self
    }

    /// Start polling on the current tokio runtime. The first tick runs
    /// immediately.
    pub fn spawn(self) -> MonitorHandle {
        let id = MonitorId::generate();
        let (tx, rx) = watch::channel(self.poller.view());
        let stop = Arc::new(Notify::new());
        let task = tokio::spawn(run_loop(self.poller, tx, Arc::clone(&stop), id.clone()));
        MonitorHandle {
            id,
            view: rx,
            stop,
            task: Some(task),
        }
    }
}

async fn run_loop<R: ResourceAccess>(
    mut poller: Poller<R>,
    tx: watch::Sender<RunView>,
    stop: Arc<Notify>,
    id: MonitorId,
) -> Result<(), MonitorError> {
    let interval = poller.config().interval;
    let run_id = poller.snapshot().run_id.clone();
    tracing::info!(monitor_id = %id, run_id = %run_id, ?interval, "monitor started");

    loop {
        let outcome = tokio::select! {
            biased;
            _ = stop.notified() => None,
            outcome = poller.tick() => Some(outcome),
        };
        let Some(outcome) = outcome else {
            poller.stop(StopReason::Cancelled);
            tx.send_replace(poller.view());
            return Ok(());
        };

        match &outcome {
            Ok(TickOutcome::Updated { status, changed }) => {
                tracing::debug!(monitor_id = %id, %status, changed, "tick complete");
            }
            Ok(TickOutcome::Failed { consecutive, .. }) => {
                tracing::debug!(monitor_id = %id, consecutive, "tick failed");
            }
            Ok(TickOutcome::Skipped) => {}
            Err(e) => {
                tracing::error!(monitor_id = %id, run_id = %run_id, error = %e, "monitor aborted");
            }
        }
        tx.send_replace(poller.view());
        outcome?;

        if let PollerState::Stopped { reason } = poller.state() {
            tracing::info!(monitor_id = %id, run_id = %run_id, ?reason, "monitor finished");
            return Ok(());
        }

        tokio::select! {
            biased;
            _ = stop.notified() => {
                poller.stop(StopReason::Cancelled);
                tx.send_replace(poller.view());
                return Ok(());
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

/// Owner handle for a spawned monitor.
///
/// Dropping the handle cancels the monitor.
pub struct MonitorHandle {
    id: MonitorId,
    view: watch::Receiver<RunView>,
    stop: Arc<Notify>,
    task: Option<JoinHandle<Result<(), MonitorError>>>,
}

impl MonitorHandle {
    pub fn id(&self) -> &MonitorId {
        &self.id
    }

    /// The most recently published view.
    pub fn view(&self) -> RunView {
        self.view.borrow().clone()
    }

    /// A receiver notified after every tick.
    pub fn subscribe(&self) -> watch::Receiver<RunView> {
        self.view.clone()
    }

    /// Wait for the monitor to finish on its own (terminal status, failure
    /// cap or error) and return the last view.
    pub async fn wait(&mut self) -> Result<RunView, MonitorError> {
        // Poll by reference so a cancelled wait leaves the task owned by
        // the handle and still aborted on drop.
        if let Some(task) = self.task.as_mut() {
            let joined = task.await;
            self.task = None;
            match joined {
                Ok(result) => result?,
                Err(e) => return Err(MonitorError::Task(e.to_string())),
            }
        }
        Ok(self.view())
    }

    /// Stop polling and wait for the task to wind down.
    pub async fn stop(mut self) -> Result<RunView, MonitorError> {
        self.stop.notify_one();
        self.wait().await
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
