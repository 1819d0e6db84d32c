// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Half-open time intervals
//!
//! Intervals are `[start, end)` in UTC. The derived ordering compares start
//! first and, on a tied start, the shorter interval first.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawInterval")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Wire form of [`Interval`], clamped through [`Interval::new`] on the way in
#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl From<RawInterval> for Interval {
    fn from(raw: RawInterval) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Create an interval. An end before the start collapses to an
    /// instantaneous interval at `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn instant(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    /// The whole UTC calendar day `date`
    pub fn day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True for a zero-length interval
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Whether `at` falls in `[start, end)`
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    /// Whether the two intervals share at least one instant.
    ///
    /// Abutting intervals do not overlap. An instantaneous interval overlaps
    /// another interval that contains it, or an identical instant.
    pub fn overlaps(&self, other: &Interval) -> bool {
        match (self.is_instant(), other.is_instant()) {
            (false, false) => self.start < other.end && other.start < self.end,
            (true, false) => other.contains(self.start),
            (false, true) => self.contains(other.start),
            (true, true) => self.start == other.start,
        }
    }

    /// A copy of this interval with a different end, clamped to the start
    pub fn with_end(&self, end: DateTime<Utc>) -> Self {
        Self::new(self.start, end)
    }

    /// UTC calendar dates touched by this interval, in order
    pub fn days(&self) -> Vec<NaiveDate> {
        let first = self.start.date_naive();
        let last = if self.is_instant() {
            first
        } else {
            (self.end - Duration::nanoseconds(1)).date_naive()
        };
        first.iter_days().take_while(|day| *day <= last).collect()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

#[cfg(test)]
#[path = "interval_tests.rs"]
mod tests;
