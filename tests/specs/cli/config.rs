//! Configuration specs

use crate::prelude::*;

#[test]
fn watch_without_api_url_fails() {
    cli()
        .args(&["watch", "run-1", "--org", "acme", "--workspace", "net"])
        .fails()
        .code(1)
        .stderr_has("no API base URL configured");
}

#[test]
fn malformed_config_file_is_reported() {
    cli()
        .config("[api\nbase_url = ")
        .args(&["cancel", "run-1", "--org", "acme", "--workspace", "net"])
        .fails()
        .stderr_has("invalid config file");
}

#[test]
fn bad_duration_in_config_is_reported() {
    cli()
        .config("[monitor]\ninterval = \"fast\"\n")
        .args(&["watch", "run-1", "--org", "acme", "--workspace", "net"])
        .fails()
        .stderr_has("invalid duration for monitor.interval");
}

#[test]
fn api_url_from_environment_is_used() {
    // Retry never reaches the network, so any URL gets past configuration.
    cli()
        .env("RW_API_URL", UNREACHABLE_API)
        .args(&["retry", "run-1", "--org", "acme", "--workspace", "net"])
        .fails()
        .stderr_has("retry is not implemented");
}

#[test]
fn zero_interval_in_config_is_reported() {
    cli()
        .config("[monitor]\ninterval = \"0s\"\n")
        .args(&["watch", "run-1", "--org", "acme", "--workspace", "net"])
        .fails()
        .code(1)
        .stderr_has("interval must be greater than zero");
}

#[test]
fn unparseable_poll_ms_is_reported() {
    cli()
        .env("RW_API_URL", UNREACHABLE_API)
        .env("RW_POLL_MS", "soon")
        .args(&["watch", "run-1", "--org", "acme", "--workspace", "net"])
        .fails()
        .code(1)
        .stderr_has("invalid duration for RW_POLL_MS");
}
