// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::resource::{FetchError, ResourceAccess, RunContext};
use async_trait::async_trait;
use rw_core::{ResourceKind, ResourceRecord, RunId};
use tracing::Instrument;

/// Wrapper that adds tracing to any ResourceAccess
#[derive(Clone)]
pub struct TracedResources<R> {
    inner: R,
}

impl<R> TracedResources<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: ResourceAccess> ResourceAccess for TracedResources<R> {
    async fn fetch(
        &self,
        ctx: &RunContext,
        kind: ResourceKind,
        id: &str,
    ) -> Result<ResourceRecord, FetchError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.fetch(ctx, kind, id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(record) => tracing::trace!(status = ?record.status(), elapsed_ms, "fetched"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "fetch failed"),
            }
            result
        }
        .instrument(tracing::debug_span!("resource.fetch", %kind, id))
        .await
    }

    async fn fetch_audit_events(
        &self,
        ctx: &RunContext,
        run_id: &RunId,
    ) -> Result<Vec<ResourceRecord>, FetchError> {
        let start = std::time::Instant::now();
        let result = self.inner.fetch_audit_events(ctx, run_id).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::debug_span!("resource.audit_events", run_id = %run_id).in_scope(|| match &result {
            Ok(events) => tracing::trace!(count = events.len(), elapsed_ms, "fetched"),
            Err(e) => tracing::warn!(elapsed_ms, error = %e, "audit events fetch failed"),
        });
        result
    }

    async fn fetch_log(&self, url: &str) -> Result<String, FetchError> {
        let result = self.inner.fetch_log(url).await;
        tracing::debug_span!("resource.log", url).in_scope(|| match &result {
            Ok(text) => tracing::trace!(len = text.len(), "fetched"),
            Err(e) => tracing::warn!(error = %e, "log fetch failed"),
        });
        result
    }

    async fn post_action(
        &self,
        ctx: &RunContext,
        run_id: &RunId,
        action: &str,
    ) -> Result<(), FetchError> {
        async {
            tracing::info!("posting");
            let start = std::time::Instant::now();
            let result = self.inner.post_action(ctx, run_id, action).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "action accepted"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "action rejected"),
            }
            result
        }
        .instrument(tracing::info_span!(
            "resource.action",
            run_id = %run_id,
            action,
            organization = %ctx.organization,
            workspace = %ctx.workspace,
        ))
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
