// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn run_status_enumeration_has_24_codes() {
    assert_eq!(RunStatus::ALL.len(), 24);
}

#[test]
fn phase_status_enumeration_has_8_codes() {
    assert_eq!(PhaseStatus::ALL.len(), 8);
}

#[test]
fn every_run_code_parses_back_to_itself() {
    for status in RunStatus::ALL {
        assert_eq!(RunStatus::parse(status.as_str()), Ok(*status));
        assert_eq!(status.to_string(), status.as_str());
    }
}

#[test]
fn run_codes_are_distinct() {
    let mut codes: Vec<&str> = RunStatus::ALL.iter().map(|s| s.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), RunStatus::ALL.len());
}

#[yare::parameterized(
    bogus        = { "bogus_status" },
    empty        = { "" },
    wrong_case   = { "Planning" },
    padded       = { " planning" },
    phase_only   = { "finished" },
)]
fn unknown_run_code_is_rejected(code: &str) {
    let err = RunStatus::parse(code).unwrap_err();
    assert_eq!(err.family, "run");
    assert_eq!(err.code, code);
}

#[test]
fn unknown_status_message_names_family_and_code() {
    let err = PhaseStatus::parse("exploded").unwrap_err();
    assert_eq!(err.to_string(), "unknown phase status: \"exploded\"");
}

#[test]
fn from_str_matches_parse() {
    let parsed: TaskStageStatus = "awaiting_override".parse().unwrap();
    assert_eq!(parsed, TaskStageStatus::AwaitingOverride);
    assert!("awaiting".parse::<TaskStageStatus>().is_err());
}

#[test]
fn serde_uses_wire_codes() {
    let json = serde_json::to_string(&RunStatus::PlannedAndFinished).unwrap();
    assert_eq!(json, "\"planned_and_finished\"");
    let parsed: TaskResultStatus = serde_json::from_str("\"errored\"").unwrap();
    assert_eq!(parsed, TaskResultStatus::Errored);
}
