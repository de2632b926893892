// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration loaded from TOML
//!
//! Every field has a default, so an empty or missing file is valid:
//!
//! ```toml
//! [engine]
//! base_url = "http://localhost:8080"
//! user_id = "local-user"
//! request_timeout = "10s"
//!
//! [polling]
//! interval = "2s"
//! max_in_flight = 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides `engine.base_url`
pub const ENGINE_URL_ENV: &str = "FINFLOW_ENGINE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinflowConfig {
    pub engine: EngineConfig,
    pub polling: PollingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub base_url: String,
    /// Sent as `userId` on every start request
    pub user_id: String,
    /// Bound on each status query
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            user_id: "local-user".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollingConfig {
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Upper bound on concurrent status queries per sweep
    pub max_in_flight: usize,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_in_flight: 8,
        }
    }
}

impl FinflowConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::parse_at(Path::new("<inline>"), content)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_at(path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Apply an `engine.base_url` override, typically from `FINFLOW_ENGINE_URL`
    pub fn with_engine_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.engine.base_url = url;
        }
        self
    }

    /// `with_engine_url` fed from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_engine_url(std::env::var(ENGINE_URL_ENV).ok())
    }

    fn parse_at(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.polling.interval.is_zero() {
            return Err(ConfigError::Invalid(
                "polling.interval must be greater than zero".to_string(),
            ));
        }
        if self.polling.max_in_flight == 0 {
            return Err(ConfigError::Invalid(
                "polling.max_in_flight must be at least 1".to_string(),
            ));
        }
        if self.engine.request_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "engine.request_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
