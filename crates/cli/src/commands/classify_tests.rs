// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use yare::parameterized;

fn plain() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[parameterized(
    run = { StatusKind::Run, "planning" },
    phase = { StatusKind::Phase, "finished" },
    stage = { StatusKind::Stage, "awaiting_override" },
    result = { StatusKind::Result, "passed" },
)]
fn known_codes_are_described(kind: StatusKind, code: &str) {
    let c = describe(kind, code).unwrap();
    assert_eq!(c.kind, kind);
    assert_eq!(c.code, code);
}

#[parameterized(
    run = { StatusKind::Run, "finished" },
    phase = { StatusKind::Phase, "planning" },
    stage = { StatusKind::Stage, "bogus" },
    result = { StatusKind::Result, "awaiting_override" },
)]
fn codes_from_other_enumerations_are_unknown(kind: StatusKind, code: &str) {
    let err = describe(kind, code).unwrap_err();
    assert_eq!(err.code, code);
}

#[test]
#[serial]
fn run_text_lists_actions_and_rechecks() {
    plain();
    let text = render_text(&describe(StatusKind::Run, "planning").unwrap());

    assert_eq!(
        text,
        "Planning (planning)\n  color:    processing\n  icon:     sync\n  final:    no\n  actions:  cancel\n  recheck:  plan\n"
    );
}

#[test]
#[serial]
fn terminal_run_text() {
    plain();
    let text = render_text(&describe(StatusKind::Run, "applied").unwrap());

    assert!(text.starts_with("Applied (applied)\n"));
    assert!(text.contains("  final:    yes\n"));
    assert!(text.contains("  actions:  retry\n"));
    assert!(text.contains("  recheck:  none\n"));
}

#[test]
#[serial]
fn badge_text_has_no_actions() {
    plain();
    let text = render_text(&describe(StatusKind::Phase, "errored").unwrap());

    assert_eq!(
        text,
        "Errored (errored)\n  color:    error\n  icon:     close-circle\n  final:    yes\n"
    );
}

#[test]
fn json_flattens_descriptor() {
    let c = describe(StatusKind::Run, "planned").unwrap();
    let json = serde_json::to_value(&c).unwrap();

    assert_eq!(json["kind"], "run");
    assert_eq!(json["code"], "planned");
    assert_eq!(json["display_name"], "Needs confirmation");
    assert_eq!(json["color"], "warning");
    assert_eq!(json["is_final"], false);
    assert_eq!(json["actions"], serde_json::json!(["APPLY", "DISCARD"]));
}

#[test]
fn json_for_badge_kind() {
    let c = describe(StatusKind::Stage, "running").unwrap();
    let json = serde_json::to_value(&c).unwrap();

    assert_eq!(json["kind"], "stage");
    assert_eq!(json["display_name"], "Running");
    assert!(json.get("actions").is_none());
}
