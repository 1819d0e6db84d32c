// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::{ResolveError, WriteScheduleError};
use std::future::Future;
use std::time::Duration;

/// A collaborator call that exceeded its time limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimedOut {
    pub operation: &'static str,
    pub elapsed_ms: u64,
}

pub(crate) async fn deadline<F: Future>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> Result<F::Output, TimedOut> {
    tokio::time::timeout(limit, fut).await.map_err(|_| {
        tracing::warn!(operation, limit_ms = millis(limit), "timed out");
        TimedOut {
            operation,
            elapsed_ms: millis(limit),
        }
    })
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`
pub(crate) fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl From<TimedOut> for WriteScheduleError {
    fn from(t: TimedOut) -> Self {
        Self::Timeout {
            operation: t.operation,
            elapsed_ms: t.elapsed_ms,
        }
    }
}

impl From<TimedOut> for ResolveError {
    fn from(t: TimedOut) -> Self {
        Self::Timeout {
            operation: t.operation,
            elapsed_ms: t.elapsed_ms,
        }
    }
}

#[cfg(test)]
#[path = "deadline_tests.rs"]
mod tests;
