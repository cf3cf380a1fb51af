// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the run monitor

use rw_adapters::FetchError;
use rw_core::{Action, UnknownStatus};
use thiserror::Error;

/// Errors that stop a monitor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    /// The backend reported a run status this build does not know.
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),
    #[error("monitor task failed: {0}")]
    Task(String),
}

/// Errors from triggering a run action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{action} is not implemented")]
    NotImplemented { action: Action },
    #[error("{action} rejected: {source}")]
    Rejected {
        action: Action,
        #[source]
        source: FetchError,
    },
}
