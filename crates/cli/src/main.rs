// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw - watch and act on infrastructure runs

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;

use output::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{action, classify, watch};
use rw_core::Action;

#[derive(Parser)]
#[command(
    name = "rw",
    version,
    about = "rw - Watch infrastructure runs and trigger run actions",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe a status code
    Classify(classify::ClassifyArgs),
    /// Follow a run until it reaches a terminal status
    Watch(watch::WatchArgs),
    /// Confirm a run that is waiting for approval
    Apply(action::ActionArgs),
    /// Cancel a running run
    Cancel(action::ActionArgs),
    /// Discard a run that is waiting for approval
    Discard(action::ActionArgs),
    /// Force-cancel a run that did not stop after cancel
    ForceCancel(action::ActionArgs),
    /// Retry a finished run
    Retry(action::ActionArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped. Otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    // Classification is pure and never touches the network or the log file.
    if let Commands::Classify(args) = command {
        return classify::handle(args, format);
    }

    let _log_guard = match logging::setup() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {e}");
            None
        }
    };

    match command {
        Commands::Classify(_) => Ok(()),
        Commands::Watch(args) => watch::handle(args, format).await,
        Commands::Apply(args) => action::handle(Action::Apply, args, format).await,
        Commands::Cancel(args) => action::handle(Action::Cancel, args, format).await,
        Commands::Discard(args) => action::handle(Action::Discard, args, format).await,
        Commands::ForceCancel(args) => action::handle(Action::ForceCancel, args, format).await,
        Commands::Retry(args) => action::handle(Action::Retry, args, format).await,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
