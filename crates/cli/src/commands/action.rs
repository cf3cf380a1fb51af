// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rw apply|cancel|discard|force-cancel|retry` - request a run action.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use rw_adapters::{
    DesktopNotifyAdapter, HttpResourceAccess, NoOpNotifyAdapter, NotifyAdapter, ResourceAccess,
    TracedResources,
};
use rw_core::{Action, RunId};
use rw_engine::{ActionError, RunActions};
use serde::Serialize;

use super::RunTarget;
use crate::config;
use crate::exit_error::{codes, ExitError};
use crate::output::{write_json_line, OutputFormat};

#[derive(Args)]
pub struct ActionArgs {
    #[command(flatten)]
    pub target: RunTarget,

    /// Do not raise a desktop notification when the backend rejects the action
    #[arg(long)]
    pub no_notify: bool,
}

#[derive(Debug, Serialize)]
struct Requested<'a> {
    run_id: &'a RunId,
    action: Action,
}

fn action_error(e: ActionError) -> anyhow::Error {
    let code = match e {
        ActionError::Rejected { .. } => codes::ACTION_REJECTED,
        ActionError::NotImplemented { .. } => codes::FAILURE,
    };
    ExitError::new(code, e.to_string()).into()
}

/// Trigger `action` and report the request.
pub async fn request<R: ResourceAccess, N: NotifyAdapter>(
    actions: &RunActions<R, N>,
    action: Action,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    actions.trigger(action).await.map_err(action_error)?;

    let run_id = actions.run_id();
    match format {
        OutputFormat::Text => writeln!(out, "Requested {action} for run {run_id}")?,
        OutputFormat::Json => write_json_line(out, &Requested { run_id, action })?,
    }
    Ok(())
}

pub async fn handle(action: Action, args: ActionArgs, format: OutputFormat) -> Result<()> {
    let settings = config::load(args.target.overrides())?;
    let resources = TracedResources::new(HttpResourceAccess::new(settings.http_config()?)?);
    let ctx = args.target.context();
    let run_id = args.target.run_id();
    let mut out = std::io::stdout();

    if args.no_notify {
        let actions = RunActions::new(resources, NoOpNotifyAdapter::new(), ctx, run_id);
        request(&actions, action, format, &mut out).await
    } else {
        let actions = RunActions::new(resources, DesktopNotifyAdapter::new(), ctx, run_id);
        request(&actions, action, format, &mut out).await
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
