// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP resource access against a JSON:API backend, using reqwest.

use super::jsonapi::{decode_collection, decode_document};
use super::{FetchError, ResourceAccess, RunContext};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use rw_core::{ResourceKind, ResourceRecord, RunId};
use std::sync::Arc;
use std::time::Duration;

const JSON_API: &str = "application/vnd.api+json";

/// Connection settings for [`HttpResourceAccess`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// API root, e.g. `https://runs.example.com/api/v2`
    pub base_url: String,
    /// Bearer token sent on every request
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

struct HttpInner {
    http: Client,
    base_url: Url,
}

/// Production [`ResourceAccess`] speaking JSON:API over HTTP.
#[derive(Clone)]
pub struct HttpResourceAccess {
    inner: Arc<HttpInner>,
}

impl std::fmt::Debug for HttpResourceAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResourceAccess")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpResourceAccess {
    pub fn new(config: HttpConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            FetchError::Transport(format!("invalid base url {}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Transport(format!(
                "invalid base url {}: not a hierarchical url",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| FetchError::Transport(format!("invalid token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(concat!("rw/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        tracing::debug!(base_url = %config.base_url, "created http resource client");

        Ok(Self {
            inner: Arc::new(HttpInner {
                http,
                base_url,
            }),
        })
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        // Hierarchical bases are checked in `new`, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// URL of a single resource.
    pub fn resource_url(&self, ctx: &RunContext, kind: ResourceKind, id: &str) -> Url {
        match kind {
            ResourceKind::Run => self.url(&[
                "organizations",
                &ctx.organization,
                "workspaces",
                &ctx.workspace,
                "runs",
                id,
            ]),
            other => self.url(&[other.collection(), id]),
        }
    }

    fn audit_url(&self, run_id: &RunId) -> Url {
        self.url(&["runs", run_id.as_str(), ResourceKind::AuditEvent.collection()])
    }

    fn action_url(&self, run_id: &RunId, action: &str) -> Url {
        self.url(&["runs", run_id.as_str(), "actions", action])
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport(&e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await.map_err(|e| map_transport(&e))?;
        Ok(body.to_vec())
    }
}

fn map_transport(e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_decode() {
        FetchError::Decode(e.to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}

#[async_trait]
impl ResourceAccess for HttpResourceAccess {
    async fn fetch(
        &self,
        ctx: &RunContext,
        kind: ResourceKind,
        id: &str,
    ) -> Result<ResourceRecord, FetchError> {
        let url = self.resource_url(ctx, kind, id);
        let body = self.get_bytes(url.as_str()).await?;
        decode_document(kind, &body)
    }

    async fn fetch_audit_events(
        &self,
        _ctx: &RunContext,
        run_id: &RunId,
    ) -> Result<Vec<ResourceRecord>, FetchError> {
        let body = self.get_bytes(self.audit_url(run_id).as_str()).await?;
        decode_collection(ResourceKind::AuditEvent, &body)
    }

    async fn fetch_log(&self, url: &str) -> Result<String, FetchError> {
        let body = self.get_bytes(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn post_action(
        &self,
        _ctx: &RunContext,
        run_id: &RunId,
        action: &str,
    ) -> Result<(), FetchError> {
        let url = self.action_url(run_id, action);
        let response = self
            .inner
            .http
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, JSON_API)
            .body("{}")
            .send()
            .await
            .map_err(|e| map_transport(&e))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            })
        }
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
