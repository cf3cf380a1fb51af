//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn rw_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn rw_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("classify")
        .stdout_has("watch")
        .stdout_has("apply")
        .stdout_has("force-cancel")
        .stdout_has("retry");
}

#[test]
fn rw_watch_help_shows_target_flags() {
    cli()
        .args(&["watch", "--help"])
        .passes()
        .stdout_has("--org")
        .stdout_has("--workspace")
        .stdout_has("--interval");
}

#[test]
fn rw_version_exits_zero() {
    cli().args(&["--version"]).passes().stdout_has("rw ");
}

#[test]
fn unknown_command_fails() {
    cli().args(&["plan"]).fails().code(2);
}
