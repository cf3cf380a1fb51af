// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rw watch` - follow a run until it reaches a terminal status.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Args;
use rw_adapters::{HttpResourceAccess, ResourceAccess, RunContext, TracedResources};
use rw_core::{ColorClass, RunId, RunStatus};
use rw_engine::{MonitorConfig, MonitorError, RunMonitor, RunView, StopReason};

use super::RunTarget;
use crate::color;
use crate::config;
use crate::exit_error::{codes, ExitError};
use crate::output::{write_json_line, OutputFormat};

#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub target: RunTarget,

    /// Time between polls (e.g. `500ms`, `2s`)
    #[arg(long, value_parser = rw_core::parse_interval)]
    pub interval: Option<Duration>,
}

/// Turns published views into output, one line per change worth reporting.
pub struct TransitionPrinter {
    format: OutputFormat,
    colorize: bool,
    last_status: Option<RunStatus>,
    stale: bool,
}

impl TransitionPrinter {
    pub fn new(format: OutputFormat, colorize: bool) -> Self {
        Self {
            format,
            colorize,
            last_status: None,
            stale: false,
        }
    }

    fn paint(&self, text: &str, class: ColorClass) -> String {
        if self.colorize {
            color::apply_status(text, class)
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.colorize {
            color::apply_muted(text)
        } else {
            text.to_string()
        }
    }

    /// Text lines for `view`, updating what has already been reported.
    pub fn lines(&mut self, view: &RunView) -> Vec<String> {
        let run_id = &view.snapshot.run_id;
        let mut lines = Vec::new();

        if view.stale && !self.stale {
            let msg = format!(
                "stale: {} consecutive fetches failed",
                view.consecutive_failures
            );
            lines.push(format!("{run_id}  {}", self.paint(&msg, ColorClass::Warning)));
        } else if !view.stale && self.stale {
            lines.push(format!("{run_id}  {}", self.dim("data refreshed")));
        }
        self.stale = view.stale;

        if let Some(d) = view.descriptor {
            if self.last_status != Some(d.status) {
                let mut line = format!("{run_id}  {}", self.paint(d.display_name, d.color));
                let actions: Vec<String> = view.actions.iter().map(|a| a.to_string()).collect();
                if !actions.is_empty() {
                    let hint = format!("[{}]", actions.join(", "));
                    line.push_str(&format!("  {}", self.dim(&hint)));
                }
                lines.push(line);
                self.last_status = Some(d.status);
            }
        }

        if view.stop_reason() == Some(StopReason::Cancelled) {
            lines.push(format!("{run_id}  {}", self.dim("stopped")));
        }
        lines
    }

    pub fn write(&mut self, out: &mut impl Write, view: &RunView) -> Result<()> {
        match self.format {
            OutputFormat::Json => write_json_line(out, view)?,
            OutputFormat::Text => {
                for line in self.lines(view) {
                    writeln!(out, "{line}")?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn monitor_error(e: MonitorError) -> anyhow::Error {
    match e {
        MonitorError::UnknownStatus(e) => {
            ExitError::new(codes::UNKNOWN_STATUS, e.to_string()).into()
        }
        other => other.into(),
    }
}

/// Monitor `run_id` and report each published view until the run stops
/// or `shutdown` resolves. Returns the last view.
pub async fn follow<R: ResourceAccess>(
    resources: R,
    ctx: RunContext,
    run_id: RunId,
    config: MonitorConfig,
    printer: &mut TransitionPrinter,
    out: &mut impl Write,
    shutdown: impl Future<Output = ()>,
) -> Result<RunView> {
    let mut handle = RunMonitor::new(resources, ctx, run_id, config).spawn();
    let mut rx = handle.subscribe();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                let view = handle.stop().await.map_err(monitor_error)?;
                printer.write(out, &view)?;
                return Ok(view);
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = rx.borrow_and_update().clone();
                printer.write(out, &view)?;
                if !view.is_active() {
                    break;
                }
            }
        }
    }

    handle.wait().await.map_err(monitor_error)
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

pub async fn handle(args: WatchArgs, format: OutputFormat) -> Result<()> {
    let mut flags = args.target.overrides();
    flags.interval = args.interval;
    let settings = config::load(flags)?;
    let resources = TracedResources::new(HttpResourceAccess::new(settings.http_config()?)?);
    let run_id = args.target.run_id();

    let mut printer = TransitionPrinter::new(format, color::should_colorize());
    let mut out = std::io::stdout();
    let view = follow(
        resources,
        args.target.context(),
        run_id.clone(),
        settings.monitor,
        &mut printer,
        &mut out,
        ctrl_c(),
    )
    .await?;

    match view.stop_reason() {
        Some(StopReason::FailureLimit) => Err(anyhow!(
            "gave up on run {run_id} after {} consecutive failed fetches",
            view.consecutive_failures
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
