// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide cache of resolved users.
//!
//! A user's identity never changes, so a successful lookup is kept for the
//! life of the process. Failed lookups are not cached and are retried on the
//! next request.

use parking_lot::Mutex;
use rw_adapters::{FetchError, ResourceAccess, RunContext};
use rw_core::resource::attr;
use rw_core::{ResourceKind, UserId, UserSnapshot};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<UserSnapshot>>;

#[derive(Clone, Default)]
pub struct UserCache {
    users: Arc<Mutex<HashMap<UserId, Slot>>>,
}

impl UserCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every monitor in this process.
    pub fn shared() -> Self {
        static SHARED: OnceLock<UserCache> = OnceLock::new();
        SHARED.get_or_init(UserCache::new).clone()
    }

    fn slot(&self, id: &UserId) -> Slot {
        self.users.lock().entry(id.clone()).or_default().clone()
    }

    pub fn get(&self, id: &UserId) -> Option<UserSnapshot> {
        self.users.lock().get(id).and_then(|slot| slot.get().cloned())
    }

    /// Insert unless already present; returns the cached value.
    pub fn insert(&self, user: UserSnapshot) -> UserSnapshot {
        let slot = self.slot(&user.id);
        // Fails when already set or while a fetch for this id is in flight.
        let _ = slot.set(user.clone());
        slot.get().cloned().unwrap_or(user)
    }

    pub fn len(&self) -> usize {
        self.users
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached user or fetch it.
    ///
    /// Concurrent misses for one id share a single fetch. The map lock is
    /// never held across the fetch, and a failed fetch leaves the slot empty
    /// so the next caller retries.
    pub async fn resolve<R: ResourceAccess>(
        &self,
        resources: &R,
        ctx: &RunContext,
        id: &UserId,
    ) -> Result<UserSnapshot, FetchError> {
        let slot = self.slot(id);
        if let Some(user) = slot.get() {
            tracing::trace!(user_id = %id, "user cache hit");
            return Ok(user.clone());
        }
        let user = slot
            .get_or_try_init(|| async move {
                let record = resources.fetch(ctx, ResourceKind::User, id.as_str()).await?;
                let username = record
                    .attr_str(attr::USERNAME)
                    .unwrap_or(id.as_str())
                    .to_string();
                Ok::<_, FetchError>(UserSnapshot {
                    id: id.clone(),
                    username,
                })
            })
            .await?;
        Ok(user.clone())
    }
}

#[cfg(test)]
#[path = "user_cache_tests.rs"]
mod tests;
