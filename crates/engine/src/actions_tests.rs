// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rw_adapters::{FakeNotifyAdapter, FakeResourceAccess, FetchError, ResourceCall};

fn actions(
    fake: &FakeResourceAccess,
    notify: &FakeNotifyAdapter,
) -> RunActions<FakeResourceAccess, FakeNotifyAdapter> {
    RunActions::new(
        fake.clone(),
        notify.clone(),
        RunContext::new("acme", "networking"),
        RunId::new("run-1"),
    )
}

#[yare::parameterized(
    apply        = { Action::Apply,       "apply" },
    cancel       = { Action::Cancel,      "cancel" },
    discard      = { Action::Discard,     "discard" },
    force_cancel = { Action::ForceCancel, "force-cancel" },
)]
fn posts_to_the_action_endpoint(action: Action, endpoint: &str) {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async {
            let fake = FakeResourceAccess::new();
            let notify = FakeNotifyAdapter::new();

            actions(&fake, &notify).trigger(action).await.unwrap();

            assert_eq!(
                fake.calls(),
                vec![ResourceCall::Action {
                    run_id: "run-1".to_string(),
                    action: endpoint.to_string(),
                }]
            );
            assert!(notify.notices().is_empty());
        });
}

#[yare::parameterized(
    retry     = { Action::Retry },
    override_ = { Action::OverrideAndContinue },
)]
fn actions_without_endpoint_are_not_implemented(action: Action) {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async {
            let fake = FakeResourceAccess::new();
            let notify = FakeNotifyAdapter::new();

            let err = actions(&fake, &notify).trigger(action).await.unwrap_err();

            assert_eq!(err, ActionError::NotImplemented { action });
            assert!(fake.calls().is_empty());
        });
}

#[tokio::test]
async fn rejection_is_notified_and_returned() {
    let fake = FakeResourceAccess::new();
    let notify = FakeNotifyAdapter::new();
    fake.reject_action(
        "discard",
        FetchError::Status {
            code: 409,
            url: "fake://discard".to_string(),
        },
    );

    let err = actions(&fake, &notify).discard_run().await.unwrap_err();

    assert!(matches!(
        err,
        ActionError::Rejected {
            action: Action::Discard,
            source: FetchError::Status { code: 409, .. }
        }
    ));
    let notices = notify.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Run run-1");
    assert!(notices[0].body.contains("discard rejected"));
}

#[tokio::test]
async fn named_triggers_map_to_actions() {
    let fake = FakeResourceAccess::new();
    let notify = FakeNotifyAdapter::new();
    let actions = actions(&fake, &notify);

    actions.apply_run().await.unwrap();
    actions.cancel_run().await.unwrap();
    actions.force_cancel_run().await.unwrap();
    assert!(actions.retry_run().await.is_err());
    assert!(actions.override_run().await.is_err());

    let posted: Vec<_> = fake
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            ResourceCall::Action { action, .. } => Some(action),
            _ => None,
        })
        .collect();
    assert_eq!(posted, ["apply", "cancel", "force-cancel"]);
}
