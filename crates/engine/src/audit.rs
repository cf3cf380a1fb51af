// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translation of raw run events into audit entries.

use crate::user_cache::UserCache;
use rw_adapters::{ResourceAccess, RunContext};
use rw_core::resource::{attr, rel};
use rw_core::{classify, AuditEntry, ResourceRecord, UserId, SYSTEM_USER};
use std::collections::HashMap;
use std::time::Duration;

const STATUS_CHANGE: &str = "status_change";

/// A status-change event before its user is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub description: String,
    pub timestamp: String,
    pub user_id: Option<UserId>,
}

/// Extract a status change from a raw event; `None` for any other event.
pub fn status_change(event: &ResourceRecord) -> Option<StatusChange> {
    if event.attr_str(attr::ACTION) != Some(STATUS_CHANGE) {
        return None;
    }
    let description = match event.attr_str(attr::DESCRIPTION) {
        Some(text) => text.to_string(),
        None => {
            let code = event.attr_str(attr::NEW_STATUS).unwrap_or_default();
            let name = classify(code).map(|d| d.display_name).unwrap_or(code);
            format!("Status changed to {name}")
        }
    };
    Some(StatusChange {
        description,
        timestamp: event.attr_str(attr::CREATED_AT).unwrap_or_default().to_string(),
        user_id: event.relationship(rel::USER).map(UserId::new),
    })
}

/// Translate a full event list, resolving acting users through the cache.
///
/// Events without a user are attributed to `"system"`. A user that cannot
/// be fetched is shown by id.
pub(crate) async fn translate<R: ResourceAccess>(
    resources: &R,
    ctx: &RunContext,
    users: &UserCache,
    timeout: Duration,
    events: &[ResourceRecord],
) -> Vec<AuditEntry> {
    let mut names: HashMap<UserId, String> = HashMap::new();
    let mut entries = Vec::new();

    for change in events.iter().filter_map(status_change) {
        let user = match change.user_id {
            None => SYSTEM_USER.to_string(),
            Some(id) => match names.get(&id) {
                Some(name) => name.clone(),
                None => {
                    let name =
                        match tokio::time::timeout(timeout, users.resolve(resources, ctx, &id))
                            .await
                        {
                            Ok(Ok(user)) => user.username,
                            Ok(Err(e)) => {
                                tracing::warn!(user_id = %id, error = %e, "audit user lookup failed");
                                id.to_string()
                            }
                            Err(_) => {
                                tracing::warn!(user_id = %id, "audit user lookup timed out");
                                id.to_string()
                            }
                        };
                    names.insert(id, name.clone());
                    name
                }
            },
        };
        entries.push(AuditEntry::new(change.description, change.timestamp, user));
    }

    entries
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
