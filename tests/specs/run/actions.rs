//! Run action specs

use crate::prelude::*;

#[test]
fn retry_is_not_implemented() {
    cli()
        .args(&[
            "retry",
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
        .stderr_has("retry is not implemented");
}

#[test]
fn rejected_action_exits_3() {
    cli()
        .args(&[
            "apply",
            "run-1",
            "--org",
            "acme",
            "--workspace",
            "net",
            "--api-url",
            UNREACHABLE_API,
            "--no-notify",
        ])
        .fails()
        .code(3)
        .stderr_has("apply rejected");
}

#[test]
fn rejected_action_is_logged() {
    let builder = cli().args(&[
        "discard",
        "run-1",
        "--org",
        "acme",
        "--workspace",
        "net",
        "--api-url",
        UNREACHABLE_API,
        "--no-notify",
    ]);
    let log_path = builder.log_path();
    let output = builder.command().output().unwrap();

    assert_eq!(output.status.code(), Some(3));
    let log = std::fs::read_to_string(log_path).unwrap();
    assert!(log.contains("action rejected"), "log: {log}");
}
