//! `rw watch` specs against an unreachable backend

use crate::prelude::*;

#[test]
fn watch_gives_up_after_failure_cap() {
    cli()
        .config(
            "[api]
request_timeout = \"1s\"

[monitor]
interval = \"10ms\"
stale_after = 2
max_consecutive_failures = 3
",
        )
        .args(&[
            "watch",
            "run-1",
            "--org",
            "acme",
            "--workspace",
            "net",
            "--api-url",
            UNREACHABLE_API,
        ])
        .fails()
        .code(1)
        .stdout_has("run-1  stale: 2 consecutive fetches failed")
        .stderr_has("gave up on run run-1 after 3 consecutive failed fetches");
}

#[test]
fn watch_json_reports_failure_count() {
    let run = cli()
        .config("[monitor]\ninterval = \"10ms\"\nmax_consecutive_failures = 2\n")
        .env("RW_API_URL", UNREACHABLE_API)
        .args(&[
            "-o",
            "json",
            "watch",
            "run-1",
            "--org",
            "acme",
            "--workspace",
            "net",
        ])
        .fails();

    let last: serde_json::Value =
        serde_json::from_str(run.stdout().lines().last().unwrap()).unwrap();
    assert_eq!(last["state"], "stopped");
    assert_eq!(last["reason"], "failure_limit");
    assert_eq!(last["consecutive_failures"], 2);
    assert_eq!(last["snapshot"]["run_id"], "run-1");
}
