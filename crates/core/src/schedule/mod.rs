// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel schedules and their reconciliation
//!
//! A persisted schedule is partitioned into blocks, each a [`ChannelSchedule`]
//! covering one channel over one interval. Entries may overhang a block's
//! interval, and a long broadcast appears in every block it overlaps.

mod reference;
mod updater;

pub use reference::{
    ScheduleChange, ScheduleRef, ScheduleRefBuilder, ScheduleRefEntry, ScheduleUpdate,
    ScheduleUpdateMessage,
};
pub use updater::ScheduleBlockUpdater;

use crate::content::{Broadcast, Channel, ItemAndBroadcast};
use crate::id::Id;
use crate::interval::Interval;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether a broadcast falls in the scope of a channel and interval
pub fn broadcast_in_scope(broadcast: &Broadcast, channel_id: Id, interval: &Interval) -> bool {
    broadcast.channel_id() == channel_id && interval.overlaps(&broadcast.transmission())
}

/// Entries for one channel over an interval, ascending by broadcast start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSchedule {
    channel: Channel,
    interval: Interval,
    entries: Vec<ItemAndBroadcast>,
}

impl ChannelSchedule {
    pub fn new(
        channel: Channel,
        interval: Interval,
        entries: impl IntoIterator<Item = ItemAndBroadcast>,
    ) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(ItemAndBroadcast::start_order);
        Self {
            channel,
            interval,
            entries,
        }
    }

    /// A schedule for the same channel and interval with different entries
    pub fn copy_with_entries(&self, entries: impl IntoIterator<Item = ItemAndBroadcast>) -> Self {
        Self::new(self.channel.clone(), self.interval, entries)
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn entries(&self) -> &[ItemAndBroadcast] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ItemAndBroadcast> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `broadcast` belongs to this block's channel and interval
    pub fn admits(&self, broadcast: &Broadcast) -> bool {
        broadcast_in_scope(broadcast, self.channel.id, &self.interval)
    }
}

/// Channel schedules sharing an interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    interval: Interval,
    channel_schedules: Vec<ChannelSchedule>,
}

impl Schedule {
    pub fn new(interval: Interval, channel_schedules: Vec<ChannelSchedule>) -> Self {
        Self {
            interval,
            channel_schedules,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn channel_schedules(&self) -> &[ChannelSchedule] {
        &self.channel_schedules
    }
}

/// Result of reconciling an update against persisted blocks.
///
/// `stale_entries` are broadcasts no longer asserted by the feed;
/// `stale_content` are slots still scheduled whose attached item changed.
/// Neither set has a meaningful order.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBlocksUpdate {
    updated_blocks: Vec<ChannelSchedule>,
    stale_entries: HashSet<ItemAndBroadcast>,
    stale_content: HashSet<ItemAndBroadcast>,
}

impl ScheduleBlocksUpdate {
    pub fn new(
        updated_blocks: Vec<ChannelSchedule>,
        stale_entries: HashSet<ItemAndBroadcast>,
        stale_content: HashSet<ItemAndBroadcast>,
    ) -> Self {
        Self {
            updated_blocks,
            stale_entries,
            stale_content,
        }
    }

    pub fn updated_blocks(&self) -> &[ChannelSchedule] {
        &self.updated_blocks
    }

    pub fn stale_entries(&self) -> &HashSet<ItemAndBroadcast> {
        &self.stale_entries
    }

    pub fn stale_content(&self) -> &HashSet<ItemAndBroadcast> {
        &self.stale_content
    }

    pub fn into_parts(
        self,
    ) -> (
        Vec<ChannelSchedule>,
        HashSet<ItemAndBroadcast>,
        HashSet<ItemAndBroadcast>,
    ) {
        (self.updated_blocks, self.stale_entries, self.stale_content)
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
