// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run action triggers.
//!
//! Actions only post to the backend. The snapshot is never updated locally;
//! the next tick picks up whatever status the backend moved the run to.

use crate::error::ActionError;
use rw_adapters::{Notice, NotifyAdapter, ResourceAccess, RunContext};
use rw_core::{Action, RunId};

/// Triggers actions on one run and reports rejections to the user.
#[derive(Clone)]
pub struct RunActions<R, N> {
    resources: R,
    notify: N,
    ctx: RunContext,
    run_id: RunId,
}

impl<R: ResourceAccess, N: NotifyAdapter> RunActions<R, N> {
    pub fn new(resources: R, notify: N, ctx: RunContext, run_id: RunId) -> Self {
        Self {
            resources,
            notify,
            ctx,
            run_id,
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Post `action` to the backend.
    ///
    /// Actions without a backend endpoint fail with
    /// [`ActionError::NotImplemented`] before any request is made.
    pub async fn trigger(&self, action: Action) -> Result<(), ActionError> {
        let Some(endpoint) = action.endpoint() else {
            tracing::warn!(run_id = %self.run_id, %action, "action not implemented");
            return Err(ActionError::NotImplemented { action });
        };

        match self
            .resources
            .post_action(&self.ctx, &self.run_id, endpoint)
            .await
        {
            Ok(()) => {
                tracing::info!(run_id = %self.run_id, %action, "action requested");
                Ok(())
            }
            Err(source) => {
                let err = ActionError::Rejected { action, source };
                let notice = Notice::new(format!("Run {}", self.run_id), err.to_string());
                if let Err(e) = self.notify.notify(&notice).await {
                    tracing::warn!(error = %e, "failed to surface action rejection");
                }
                Err(err)
            }
        }
    }

    pub async fn apply_run(&self) -> Result<(), ActionError> {
        self.trigger(Action::Apply).await
    }

    pub async fn cancel_run(&self) -> Result<(), ActionError> {
        self.trigger(Action::Cancel).await
    }

    pub async fn discard_run(&self) -> Result<(), ActionError> {
        self.trigger(Action::Discard).await
    }

    pub async fn force_cancel_run(&self) -> Result<(), ActionError> {
        self.trigger(Action::ForceCancel).await
    }

    pub async fn retry_run(&self) -> Result<(), ActionError> {
        self.trigger(Action::Retry).await
    }

    pub async fn override_run(&self) -> Result<(), ActionError> {
        self.trigger(Action::OverrideAndContinue).await
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
