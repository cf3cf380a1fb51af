// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration file and overrides.
//!
//! ```toml
//! [api]
//! base_url = "https://runs.example.com/api/v2"
//! token = "..."
//! request_timeout = "10s"
//!
//! [monitor]
//! interval = "1s"
//! stale_after = 3
//! max_consecutive_failures = 20
//! ```
//!
//! Precedence, lowest first: built-in defaults, the file, environment
//! variables (`RW_API_URL`, `RW_API_TOKEN`, `RW_POLL_MS`), command flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rw_adapters::HttpConfig;
use rw_core::{parse_duration, parse_interval};
use rw_engine::MonitorConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid duration for {field}: {message}")]
    Duration { field: &'static str, message: String },
    #[error("no API base URL configured (set [api].base_url, RW_API_URL or --api-url)")]
    MissingBaseUrl,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub monitor: MonitorSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub request_timeout: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    pub interval: Option<String>,
    /// 0 disables stale marking
    pub stale_after: Option<u32>,
    pub max_consecutive_failures: Option<u32>,
}

/// Values that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub interval: Option<Duration>,
}

impl Overrides {
    pub fn from_env() -> Result<Self, ConfigError> {
        let interval = crate::env::poll_interval().map_err(|message| ConfigError::Duration {
            field: "RW_POLL_MS",
            message,
        })?;
        Ok(Self {
            base_url: crate::env::api_url(),
            token: crate::env::api_token(),
            interval,
        })
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub monitor: MonitorConfig,
}

impl Settings {
    pub fn resolve(
        file: ConfigFile,
        env: Overrides,
        flags: Overrides,
    ) -> Result<Self, ConfigError> {
        let mut monitor = MonitorConfig::default();
        if let Some(timeout) = file.api.request_timeout.as_deref() {
            monitor = monitor.with_request_timeout(duration("api.request_timeout", timeout)?);
        }
        if let Some(interval) = file.monitor.interval.as_deref() {
            let interval = parse_interval(interval).map_err(|message| ConfigError::Duration {
                field: "monitor.interval",
                message,
            })?;
            monitor = monitor.with_interval(interval);
        }
        if let Some(n) = file.monitor.stale_after {
            monitor = monitor.with_stale_after(n);
        }
        if let Some(n) = file.monitor.max_consecutive_failures {
            monitor = monitor.with_max_consecutive_failures(Some(n));
        }
        if let Some(interval) = flags.interval.or(env.interval) {
            monitor = monitor.with_interval(interval);
        }

        Ok(Self {
            base_url: flags.base_url.or(env.base_url).or(file.api.base_url),
            token: flags.token.or(env.token).or(file.api.token),
            monitor,
        })
    }

    /// HTTP settings for the backend; fails when no base URL is known.
    pub fn http_config(&self) -> Result<HttpConfig, ConfigError> {
        let base_url = self
            .base_url
            .clone()
            .ok_or(ConfigError::MissingBaseUrl)?;
        let mut http = HttpConfig::new(base_url);
        http.token = self.token.clone();
        http.timeout = self.monitor.request_timeout;
        Ok(http)
    }
}

fn duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_duration(value).map_err(|message| ConfigError::Duration { field, message })
}

/// `RW_CONFIG`, else `<config dir>/rw/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    crate::env::config_file().or_else(|| dirs::config_dir().map(|d| d.join("rw/config.toml")))
}

/// Read a config file. A missing file yields the defaults.
pub fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(ConfigFile::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config file and apply environment and flag overrides.
pub fn load(flags: Overrides) -> Result<Settings, ConfigError> {
    let file = match default_path() {
        Some(path) => load_file(&path)?,
        None => ConfigFile::default(),
    };
    Settings::resolve(file, Overrides::from_env()?, flags)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
