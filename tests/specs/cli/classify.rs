//! `rw classify` specs
//!
//! Classification is offline: no config, no network.

use crate::prelude::*;

#[test]
fn classify_run_status_text() {
    cli()
        .args(&["classify", "planned"])
        .passes()
        .stdout_eq(
            "Needs confirmation (planned)
  color:    warning
  icon:     exclamation-circle
  final:    no
  actions:  apply, discard
  recheck:  none
",
        );
}

#[test]
fn classify_running_status_names_recheck() {
    cli()
        .args(&["classify", "pre_apply_running"])
        .passes()
        .stdout_has("recheck:  pre_apply");
}

#[test]
fn classify_phase_status() {
    cli()
        .args(&["classify", "unreachable", "--kind", "phase"])
        .passes()
        .stdout_eq(
            "Unreachable (unreachable)
  color:    muted
  icon:     minus-circle
  final:    yes
",
        );
}

#[test]
fn classify_json() {
    let run = cli()
        .args(&["-o", "json", "classify", "canceled"])
        .passes();
    let json = run.stdout_json();

    assert_eq!(json["kind"], "run");
    assert_eq!(json["status"], "canceled");
    assert_eq!(json["is_final"], true);
    assert_eq!(json["actions"], serde_json::json!(["FORCE_CANCEL"]));
}

#[test]
fn unknown_run_status_exits_2() {
    cli()
        .args(&["classify", "exploded"])
        .fails()
        .code(2)
        .stderr_has("unknown run status: \"exploded\"");
}

#[test]
fn stage_status_is_not_a_run_status() {
    cli().args(&["classify", "awaiting_override"]).fails().code(2);
    cli()
        .args(&["classify", "awaiting_override", "--kind", "stage"])
        .passes()
        .stdout_has("Awaiting override");
}
