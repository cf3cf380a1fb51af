// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rw classify` - describe a status code without contacting the backend.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use clap::{Args, ValueEnum};
use rw_core::{
    classify, classify_phase, classify_result, classify_stage, Badge, StatusDescriptor,
    UnknownStatus,
};
use serde::Serialize;

use crate::color;
use crate::exit_error::{codes, ExitError};
use crate::output::{write_json, OutputFormat};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Status code reported by the backend (e.g. `planning`)
    pub code: String,

    /// Which status enumeration the code belongs to
    #[arg(long, value_enum, default_value_t)]
    pub kind: StatusKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    #[default]
    Run,
    /// Plan or apply phase
    Phase,
    /// Task stage
    Stage,
    /// Task result
    Result,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Described {
    Run(StatusDescriptor),
    Badge(Badge),
}

#[derive(Debug, Serialize)]
pub struct Classification {
    pub kind: StatusKind,
    pub code: String,
    #[serde(flatten)]
    pub described: Described,
}

pub fn describe(kind: StatusKind, code: &str) -> Result<Classification, UnknownStatus> {
    let described = match kind {
        StatusKind::Run => Described::Run(classify(code)?),
        StatusKind::Phase => Described::Badge(classify_phase(code)?),
        StatusKind::Stage => Described::Badge(classify_stage(code)?),
        StatusKind::Result => Described::Badge(classify_result(code)?),
    };
    Ok(Classification {
        kind,
        code: code.to_string(),
        described,
    })
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

pub fn render_text(c: &Classification) -> String {
    let mut buf = String::new();
    let (name, class, icon, is_final) = match &c.described {
        Described::Run(d) => (d.display_name, d.color, d.icon, d.is_final),
        Described::Badge(b) => (b.display_name, b.color, b.icon, b.is_final),
    };
    let _ = writeln!(buf, "{} ({})", color::status(name, class), c.code);
    let _ = writeln!(buf, "  color:    {class}");
    let _ = writeln!(buf, "  icon:     {icon}");
    let _ = writeln!(buf, "  final:    {}", yes_no(is_final));

    if let Described::Run(d) = &c.described {
        let actions: Vec<String> = d.actions.iter().map(|a| a.to_string()).collect();
        let actions = if actions.is_empty() {
            color::muted("none")
        } else {
            actions.join(", ")
        };
        let _ = writeln!(buf, "  actions:  {actions}");

        let r = d.recheck;
        let recheck: Vec<&str> = [
            (r.pre_plan, "pre_plan"),
            (r.plan, "plan"),
            (r.post_plan, "post_plan"),
            (r.pre_apply, "pre_apply"),
            (r.apply, "apply"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
        let recheck = if recheck.is_empty() {
            color::muted("none")
        } else {
            recheck.join(", ")
        };
        let _ = writeln!(buf, "  recheck:  {recheck}");
    }
    buf
}

pub fn handle(args: ClassifyArgs, format: OutputFormat) -> Result<()> {
    let classification = describe(args.kind, &args.code)
        .map_err(|e| ExitError::new(codes::UNKNOWN_STATUS, e.to_string()))?;

    let mut out = std::io::stdout().lock();
    match format {
        OutputFormat::Text => write!(out, "{}", render_text(&classification))?,
        OutputFormat::Json => write_json(&mut out, &classification)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
