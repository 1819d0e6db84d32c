// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::content::Broadcast;
use chrono::{DateTime, Duration, Utc};

/// Matches broadcasts of the same slot reported by different publishers,
/// whose times rarely agree to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexibleBroadcastMatcher {
    start_tolerance: Duration,
    end_tolerance: Option<Duration>,
}

impl FlexibleBroadcastMatcher {
    /// Tolerance on start times only; ends are ignored
    pub fn new(start_tolerance: Duration) -> Self {
        Self {
            start_tolerance,
            end_tolerance: None,
        }
    }

    pub fn with_end_tolerance(start_tolerance: Duration, end_tolerance: Duration) -> Self {
        Self {
            start_tolerance,
            end_tolerance: Some(end_tolerance),
        }
    }

    pub fn exact_start() -> Self {
        Self::new(Duration::zero())
    }

    pub fn exact_start_end() -> Self {
        Self::with_end_tolerance(Duration::zero(), Duration::zero())
    }

    pub fn start_tolerance(&self) -> Duration {
        self.start_tolerance
    }

    pub fn end_tolerance(&self) -> Option<Duration> {
        self.end_tolerance
    }

    /// Same channel, and times within tolerance (bounds inclusive)
    pub fn matches(&self, a: &Broadcast, b: &Broadcast) -> bool {
        a.channel_id() == b.channel_id()
            && within(a.start(), b.start(), self.start_tolerance)
            && self
                .end_tolerance
                .is_none_or(|tolerance| within(a.end(), b.end(), tolerance))
    }

    pub fn find_matching_broadcast<'a>(
        &self,
        subject: &Broadcast,
        candidates: impl IntoIterator<Item = &'a Broadcast>,
    ) -> Option<&'a Broadcast> {
        candidates
            .into_iter()
            .find(|candidate| self.matches(subject, candidate))
    }
}

fn within(a: DateTime<Utc>, b: DateTime<Utc>, tolerance: Duration) -> bool {
    (a - b).abs() <= tolerance
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
