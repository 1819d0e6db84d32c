// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Equivalent;
use crate::content::{Broadcast, Channel, Item};
use crate::id::Id;
use crate::interval::Interval;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// A broadcast slot and the equivalent items shown in it.
///
/// Equality and hashing consider the broadcast only, so a channel schedule
/// holds at most one entry per slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalentScheduleEntry {
    broadcast: Broadcast,
    #[serde(default)]
    broadcast_item_id: Option<Id>,
    items: Equivalent<Item>,
}

impl EquivalentScheduleEntry {
    pub fn create(broadcast: Broadcast, broadcast_item_id: Id, items: Equivalent<Item>) -> Self {
        Self {
            broadcast,
            broadcast_item_id: Some(broadcast_item_id),
            items,
        }
    }

    /// For rows persisted before the broadcast item id was recorded
    pub fn create_from_db(
        broadcast: Broadcast,
        broadcast_item_id: Option<Id>,
        items: Equivalent<Item>,
    ) -> Self {
        Self {
            broadcast,
            broadcast_item_id,
            items,
        }
    }

    pub fn broadcast(&self) -> &Broadcast {
        &self.broadcast
    }

    pub fn broadcast_item_id(&self) -> Option<Id> {
        self.broadcast_item_id
    }

    pub fn items(&self) -> &Equivalent<Item> {
        &self.items
    }

    pub fn start_order(a: &Self, b: &Self) -> Ordering {
        Broadcast::start_order(&a.broadcast, &b.broadcast)
    }
}

impl PartialEq for EquivalentScheduleEntry {
    fn eq(&self, other: &Self) -> bool {
        self.broadcast == other.broadcast
    }
}

impl Eq for EquivalentScheduleEntry {}

impl Hash for EquivalentScheduleEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.broadcast.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalentChannelSchedule {
    channel: Channel,
    interval: Interval,
    entries: Vec<EquivalentScheduleEntry>,
}

impl EquivalentChannelSchedule {
    /// Entries are sorted by broadcast start; a later entry for a slot
    /// replaces an earlier one
    pub fn new(
        channel: Channel,
        interval: Interval,
        entries: impl IntoIterator<Item = EquivalentScheduleEntry>,
    ) -> Self {
        let mut slots: HashMap<Broadcast, usize> = HashMap::new();
        let mut unique: Vec<EquivalentScheduleEntry> = Vec::new();
        for entry in entries {
            match slots.get(&entry.broadcast).and_then(|&index| unique.get_mut(index)) {
                Some(slot) => *slot = entry,
                None => {
                    slots.insert(entry.broadcast.clone(), unique.len());
                    unique.push(entry);
                }
            }
        }
        unique.sort_by(EquivalentScheduleEntry::start_order);
        Self {
            channel,
            interval,
            entries: unique,
        }
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn entries(&self) -> &[EquivalentScheduleEntry] {
        &self.entries
    }

    pub fn with_entry(&self, entry: EquivalentScheduleEntry) -> Self {
        let entries = self.entries.iter().cloned().chain(std::iter::once(entry));
        Self::new(self.channel.clone(), self.interval, entries)
    }

    /// The first `count` entries, with the interval ending where the last
    /// retained broadcast ends
    pub fn with_limited_broadcasts(&self, count: usize) -> Self {
        let entries: Vec<_> = self.entries.iter().take(count).cloned().collect();
        let start = self.interval.start();
        let end = entries
            .last()
            .map(|entry| entry.broadcast.end().max(start))
            .unwrap_or(start);
        Self {
            channel: self.channel.clone(),
            interval: Interval::new(start, end),
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalentSchedule {
    interval: Interval,
    channel_schedules: Vec<EquivalentChannelSchedule>,
}

impl EquivalentSchedule {
    pub fn new(interval: Interval, channel_schedules: Vec<EquivalentChannelSchedule>) -> Self {
        Self {
            interval,
            channel_schedules,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn channel_schedules(&self) -> &[EquivalentChannelSchedule] {
        &self.channel_schedules
    }

    /// Truncate every channel; the interval ends at the latest channel end
    pub fn with_limited_broadcasts(&self, count: usize) -> Self {
        let channel_schedules: Vec<_> = self
            .channel_schedules
            .iter()
            .map(|schedule| schedule.with_limited_broadcasts(count))
            .collect();
        let start = self.interval.start();
        let end = channel_schedules
            .iter()
            .map(|schedule| schedule.interval().end())
            .fold(start, |latest, end| latest.max(end));
        Self {
            interval: Interval::new(start, end),
            channel_schedules,
        }
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
