// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File logging for the `rw` binary.

use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "rw.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not resolve a state directory (set RW_STATE_DIR)")]
    NoStateDir,
    #[error("could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Path of the log file inside the state directory.
pub fn log_path() -> Result<PathBuf, LoggingError> {
    crate::env::state_dir()
        .map(|dir| dir.join(LOG_FILE))
        .ok_or(LoggingError::NoStateDir)
}

/// Install the global subscriber writing to `<state dir>/rw.log`.
///
/// The returned guard must be held until exit so buffered lines are flushed.
pub fn setup() -> Result<WorkerGuard, LoggingError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let path = log_path()?;
    let dir = path.parent().ok_or(LoggingError::NoStateDir)?;
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = crate::env::log_filter()
        .and_then(|f| EnvFilter::try_new(f).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
