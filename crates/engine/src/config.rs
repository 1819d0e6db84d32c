// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration
//!
//! Loaded from TOML; durations use humantime syntax (`"10m"`, `"1min"`,
//! `"500ms"`). Every field is optional.

use airtime_core::FlexibleBroadcastMatcher;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("duration out of range: {0}")]
    OutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Start tolerance when matching broadcasts across publishers
    #[serde(with = "humantime_serde")]
    pub broadcast_match_tolerance: Duration,
    /// End tolerance; ends are ignored when unset
    #[serde(with = "humantime_serde")]
    pub broadcast_end_tolerance: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub content_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub graph_timeout: Duration,
    /// Truncation applied when a resolve names no broadcast count
    pub default_broadcast_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            broadcast_match_tolerance: Duration::from_secs(10 * 60),
            broadcast_end_tolerance: None,
            content_timeout: Duration::from_secs(10),
            graph_timeout: Duration::from_secs(60),
            default_broadcast_limit: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Matcher for cross-publisher equivalence
    pub fn broadcast_matcher(&self) -> Result<FlexibleBroadcastMatcher, ConfigError> {
        let start = chrono_duration(self.broadcast_match_tolerance)?;
        Ok(match self.broadcast_end_tolerance {
            Some(end) => FlexibleBroadcastMatcher::with_end_tolerance(start, chrono_duration(end)?),
            None => FlexibleBroadcastMatcher::new(start),
        })
    }
}

fn chrono_duration(duration: Duration) -> Result<chrono::Duration, ConfigError> {
    chrono::Duration::from_std(duration).map_err(|_| ConfigError::OutOfRange(format!("{:?}", duration)))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
