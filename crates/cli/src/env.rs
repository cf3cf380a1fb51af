// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use std::time::Duration;

/// Read a positive millisecond count. Unset or empty is `Ok(None)`.
fn parse_duration_ms(var: &str) -> Result<Option<Duration>, String> {
    let Some(raw) = non_empty(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("interval must be greater than zero".to_string()),
        Ok(ms) => Ok(Some(Duration::from_millis(ms))),
        Err(_) => Err(format!("expected milliseconds, got {:?}", raw)),
    }
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

// --- State directory ---

/// Resolve state directory: RW_STATE_DIR > XDG_STATE_HOME/rw > ~/.local/state/rw
pub fn state_dir() -> Option<PathBuf> {
    if let Some(dir) = non_empty("RW_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("rw"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/rw"))
}

// --- Configuration ---

pub fn config_file() -> Option<PathBuf> {
    non_empty("RW_CONFIG").map(PathBuf::from)
}

pub fn api_url() -> Option<String> {
    non_empty("RW_API_URL")
}

pub fn api_token() -> Option<String> {
    non_empty("RW_API_TOKEN")
}

pub fn poll_interval() -> Result<Option<Duration>, String> {
    parse_duration_ms("RW_POLL_MS")
}

// --- Logging ---

pub fn log_filter() -> Option<String> {
    non_empty("RW_LOG")
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}
