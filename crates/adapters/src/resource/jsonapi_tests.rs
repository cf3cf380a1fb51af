// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const RUN_DOC: &str = r#"{
  "data": {
    "id": "run-1",
    "type": "runs",
    "attributes": { "status": "planning", "message": "Triggered via UI" },
    "relationships": {
      "plan": { "data": { "id": "plan-1", "type": "plans" } },
      "apply": { "data": null },
      "created-by": { "data": { "id": "user-1", "type": "users" } },
      "task-stages": { "data": [
        { "id": "ts-1", "type": "task-stages" },
        { "id": "ts-2", "type": "task-stages" }
      ] },
      "workspace": { "links": { "related": "/workspaces/ws-1" } }
    }
  }
}"#;

#[test]
fn decodes_attributes_and_relationships() {
    let record = decode_document(ResourceKind::Run, RUN_DOC.as_bytes()).unwrap();
    assert_eq!(record.kind, ResourceKind::Run);
    assert_eq!(record.id, "run-1");
    assert_eq!(record.status(), Some("planning"));
    assert_eq!(record.relationship("plan"), Some("plan-1"));
    assert_eq!(record.relationship("created-by"), Some("user-1"));
    assert_eq!(record.relationships("task-stages"), ["ts-1", "ts-2"]);
}

#[test]
fn null_and_link_only_relationships_are_empty() {
    let record = decode_document(ResourceKind::Run, RUN_DOC.as_bytes()).unwrap();
    assert_eq!(record.relationship("apply"), None);
    assert!(record.relationships("workspace").is_empty());
}

#[test]
fn resource_without_attributes_or_relationships() {
    let body = br#"{"data": {"id": "u-1", "type": "users"}}"#;
    let record = decode_document(ResourceKind::User, body).unwrap();
    assert_eq!(record.id, "u-1");
    assert!(record.attributes.is_empty());
    assert!(record.relationships.is_empty());
}

#[test]
fn decodes_collection_in_order() {
    let body = br#"{"data": [
        {"id": "ev-1", "type": "run-events", "attributes": {"action": "status_change"}},
        {"id": "ev-2", "type": "run-events", "attributes": {"action": "comment"}}
    ]}"#;
    let records = decode_collection(ResourceKind::AuditEvent, body).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["ev-1", "ev-2"]);
    assert_eq!(records[1].attr_str("action"), Some("comment"));
}

#[yare::parameterized(
    not_json        = { "<html>502</html>" },
    missing_data    = { r#"{"errors": [{"status": "404"}]}"# },
    missing_id      = { r#"{"data": {"type": "runs"}}"# },
    collection_shape = { r#"{"data": [{"id": "run-1"}]}"# },
)]
fn malformed_documents_are_decode_errors(body: &str) {
    let err = decode_document(ResourceKind::Run, body.as_bytes()).unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}
