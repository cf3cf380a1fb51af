// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod action;
pub mod classify;
pub mod watch;

use clap::Args;
use rw_adapters::RunContext;
use rw_core::RunId;

use crate::config::Overrides;

/// Arguments that identify a run on the backend.
#[derive(Args, Debug, Clone)]
pub struct RunTarget {
    /// Run ID
    pub run_id: String,

    /// Organization that owns the workspace
    #[arg(long = "org")]
    pub organization: String,

    /// Workspace the run belongs to
    #[arg(long)]
    pub workspace: String,

    /// API root URL (overrides RW_API_URL and the config file)
    #[arg(long)]
    pub api_url: Option<String>,

    /// API token (overrides RW_API_TOKEN and the config file)
    #[arg(long)]
    pub token: Option<String>,
}

impl RunTarget {
    pub fn context(&self) -> RunContext {
        RunContext::new(&self.organization, &self.workspace)
    }

    pub fn run_id(&self) -> RunId {
        RunId::new(&self.run_id)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.api_url.clone(),
            token: self.token.clone(),
            interval: None,
        }
    }
}
