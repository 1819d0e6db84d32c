// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Id-only schedule projections exchanged with indexing and messaging

use crate::content::{BroadcastRef, Publisher};
use crate::id::Id;
use crate::interval::Interval;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

/// An item scheduled in a broadcast slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleRefEntry {
    pub item: Id,
    pub broadcast: BroadcastRef,
}

impl ScheduleRefEntry {
    pub fn new(item: Id, broadcast: BroadcastRef) -> Self {
        Self { item, broadcast }
    }

    /// Channel, then start, then shorter transmission first
    pub fn schedule_order(a: &ScheduleRefEntry, b: &ScheduleRefEntry) -> Ordering {
        a.broadcast
            .channel_id
            .cmp(&b.broadcast.channel_id)
            .then_with(|| a.broadcast.transmission.cmp(&b.broadcast.transmission))
    }
}

/// Content-free schedule for a channel, ordered by [`ScheduleRefEntry::schedule_order`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRef {
    channel: Id,
    interval: Interval,
    entries: Vec<ScheduleRefEntry>,
}

impl ScheduleRef {
    pub fn for_channel(channel: Id, interval: Interval) -> ScheduleRefBuilder {
        ScheduleRefBuilder {
            channel,
            interval,
            entries: Vec::new(),
        }
    }

    pub fn channel(&self) -> Id {
        self.channel
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn entries(&self) -> &[ScheduleRefEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates entries; sorting happens once in [`ScheduleRefBuilder::build`]
#[derive(Debug, Clone)]
pub struct ScheduleRefBuilder {
    channel: Id,
    interval: Interval,
    entries: Vec<ScheduleRefEntry>,
}

impl ScheduleRefBuilder {
    pub fn add_entry(mut self, item: Id, broadcast: BroadcastRef) -> Self {
        self.push_entry(item, broadcast);
        self
    }

    pub fn push_entry(&mut self, item: Id, broadcast: BroadcastRef) {
        self.entries.push(ScheduleRefEntry::new(item, broadcast));
    }

    pub fn build(self) -> ScheduleRef {
        let mut seen = HashSet::new();
        let mut entries: Vec<_> = self
            .entries
            .into_iter()
            .filter(|entry| seen.insert(entry.clone()))
            .collect();
        entries.sort_by(ScheduleRefEntry::schedule_order);
        ScheduleRef {
            channel: self.channel,
            interval: self.interval,
            entries,
        }
    }
}

/// One step of applying a [`ScheduleUpdate`] downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleChange<'a> {
    Retract(&'a BroadcastRef),
    Upsert(&'a ScheduleRefEntry),
}

/// The reference state of a schedule after reconciliation, plus the
/// broadcasts to retract downstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    source: Publisher,
    schedule: ScheduleRef,
    #[serde(default)]
    stale_broadcasts: BTreeSet<BroadcastRef>,
}

impl ScheduleUpdate {
    pub fn new(
        source: Publisher,
        schedule: ScheduleRef,
        stale_broadcasts: impl IntoIterator<Item = BroadcastRef>,
    ) -> Self {
        Self {
            source,
            schedule,
            stale_broadcasts: stale_broadcasts.into_iter().collect(),
        }
    }

    pub fn source(&self) -> &Publisher {
        &self.source
    }

    pub fn schedule(&self) -> &ScheduleRef {
        &self.schedule
    }

    pub fn stale_broadcasts(&self) -> &BTreeSet<BroadcastRef> {
        &self.stale_broadcasts
    }

    /// Retractions first, then upserts, so consumers never hold two entries
    /// for one slot
    pub fn apply_order(&self) -> impl Iterator<Item = ScheduleChange<'_>> {
        self.stale_broadcasts
            .iter()
            .map(ScheduleChange::Retract)
            .chain(self.schedule.entries().iter().map(ScheduleChange::Upsert))
    }
}

/// Envelope for delivering a [`ScheduleUpdate`] on a message bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleUpdateMessage {
    message_id: String,
    timestamp: DateTime<Utc>,
    update: ScheduleUpdate,
}

impl ScheduleUpdateMessage {
    pub fn new(message_id: impl Into<String>, timestamp: DateTime<Utc>, update: ScheduleUpdate) -> Self {
        Self {
            message_id: message_id.into(),
            timestamp,
            update,
        }
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn update(&self) -> &ScheduleUpdate {
        &self.update
    }

    pub fn into_update(self) -> ScheduleUpdate {
        self.update
    }

    /// Messages for one channel share a partition
    pub fn partition_key(&self) -> Vec<u8> {
        self.update.schedule().channel().to_be_bytes().to_vec()
    }
}

#[cfg(test)]
#[path = "reference_tests.rs"]
mod tests;
