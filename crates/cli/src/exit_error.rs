// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors carrying a process exit code.

use std::fmt;

pub mod codes {
    pub const FAILURE: i32 = 1;
    /// A status code outside the known enumeration
    pub const UNKNOWN_STATUS: i32 = 2;
    /// The backend refused a run action
    pub const ACTION_REJECTED: i32 = 3;
}

/// An error that makes `main` exit with `code` instead of 1.
#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
