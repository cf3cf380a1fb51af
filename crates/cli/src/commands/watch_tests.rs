// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rw_adapters::{FakeResourceAccess, FetchError};
use rw_core::{test_support, ResourceKind};

async fn watch_text(fake: &FakeResourceAccess, config: MonitorConfig) -> (Result<RunView>, String) {
    watch_with(fake, config, OutputFormat::Text, std::future::pending()).await
}

async fn watch_with(
    fake: &FakeResourceAccess,
    config: MonitorConfig,
    format: OutputFormat,
    shutdown: impl Future<Output = ()>,
) -> (Result<RunView>, String) {
    let mut printer = TransitionPrinter::new(format, false);
    let mut out = Vec::new();
    let result = follow(
        fake.clone(),
        RunContext::new("acme", "networking"),
        RunId::new("run-1"),
        config,
        &mut printer,
        &mut out,
        shutdown,
    )
    .await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test(start_paused = true)]
async fn prints_one_line_per_transition() {
    let fake = FakeResourceAccess::new();
    fake.push(test_support::run("run-1", "planning").build());
    fake.push(test_support::run("run-1", "planning").build());
    fake.push(test_support::run("run-1", "planned").build());
    fake.push(test_support::run("run-1", "applying").build());
    fake.push(test_support::run("run-1", "applied").build());

    let (result, out) = watch_text(&fake, MonitorConfig::default()).await;

    let view = result.unwrap();
    assert_eq!(view.stop_reason(), Some(StopReason::Final));
    assert_eq!(
        out,
        "run-1  Planning  [cancel]\n\
         run-1  Needs confirmation  [apply, discard]\n\
         run-1  Applying  [cancel]\n\
         run-1  Applied  [retry]\n"
    );
}

#[tokio::test(start_paused = true)]
async fn marks_and_clears_stale_data() {
    let fake = FakeResourceAccess::new();
    fake.push(test_support::run("run-1", "planning").build());
    for _ in 0..3 {
        fake.push_error(ResourceKind::Run, "run-1", FetchError::Timeout);
    }
    fake.push(test_support::run("run-1", "errored").build());

    let (result, out) = watch_text(&fake, MonitorConfig::default().with_stale_after(2)).await;

    result.unwrap();
    assert_eq!(
        out,
        "run-1  Planning  [cancel]\n\
         run-1  stale: 2 consecutive fetches failed\n\
         run-1  data refreshed\n\
         run-1  Errored  [retry]\n"
    );
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_monitor() {
    let fake = FakeResourceAccess::new();
    fake.set(test_support::run("run-1", "planning").build());

    let (result, out) = watch_with(
        &fake,
        MonitorConfig::default(),
        OutputFormat::Text,
        tokio::time::sleep(Duration::from_millis(2500)),
    )
    .await;

    let view = result.unwrap();
    assert_eq!(view.stop_reason(), Some(StopReason::Cancelled));
    assert_eq!(out, "run-1  Planning  [cancel]\nrun-1  stopped\n");
    let fetched = fake.fetch_count(ResourceKind::Run, "run-1");
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(fake.fetch_count(ResourceKind::Run, "run-1"), fetched);
}

#[tokio::test(start_paused = true)]
async fn unknown_status_exits_with_code_2() {
    let fake = FakeResourceAccess::new();
    fake.push(test_support::run("run-1", "planning").build());
    fake.push(test_support::run("run-1", "half_applied").build());

    let (result, out) = watch_text(&fake, MonitorConfig::default()).await;

    let err = result.unwrap_err();
    let exit = err.downcast_ref::<ExitError>().unwrap();
    assert_eq!(exit.code, codes::UNKNOWN_STATUS);
    assert!(exit.message.contains("half_applied"));
    assert_eq!(out, "run-1  Planning  [cancel]\n");
}

#[tokio::test(start_paused = true)]
async fn failure_cap_ends_with_failure_limit() {
    let fake = FakeResourceAccess::new();
    fake.fail(ResourceKind::Run, "run-1", FetchError::Timeout);

    let (result, _) = watch_text(
        &fake,
        MonitorConfig::default().with_max_consecutive_failures(Some(3)),
    )
    .await;

    let view = result.unwrap();
    assert_eq!(view.stop_reason(), Some(StopReason::FailureLimit));
    assert_eq!(view.consecutive_failures, 3);
}

#[tokio::test(start_paused = true)]
async fn json_output_is_one_view_per_tick() {
    let fake = FakeResourceAccess::new();
    fake.push(test_support::run("run-1", "planning").build());
    fake.push(test_support::run("run-1", "planned_and_finished").build());

    let (result, out) = watch_with(
        &fake,
        MonitorConfig::default(),
        OutputFormat::Json,
        std::future::pending(),
    )
    .await;

    result.unwrap();
    let views: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0]["tick"], 1);
    assert_eq!(views[0]["state"], "active");
    assert_eq!(views[1]["snapshot"]["status"], "planned_and_finished");
    assert_eq!(views[1]["reason"], "final");
}

#[test]
fn colored_transition_uses_status_class() {
    let mut printer = TransitionPrinter::new(OutputFormat::Text, true);
    let mut snapshot = rw_core::RunSnapshot::new(RunId::new("run-1"));
    snapshot.record_status(RunStatus::Errored);
    let view = RunView {
        tick: 1,
        state: rw_engine::PollerState::Active,
        stale: false,
        consecutive_failures: 0,
        descriptor: snapshot.descriptor(),
        actions: snapshot.available_actions(),
        snapshot,
    };

    let lines = printer.lines(&view);

    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("\x1b[31mErrored\x1b[0m"), "{:?}", lines[0]);
    assert!(printer.lines(&view).is_empty());
}
