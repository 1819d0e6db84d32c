// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Merges a freshly fetched schedule into persisted blocks

use super::{broadcast_in_scope, ChannelSchedule, ScheduleBlocksUpdate};
use crate::content::{Channel, ItemAndBroadcast};
use crate::error::ScheduleError;
use crate::id::Id;
use crate::interval::Interval;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Reconciles an update for one channel and interval against the blocks
/// currently persisted for it.
///
/// Entries outside the update's channel and interval are carried over
/// untouched, even when an updated entry shares their source id. Inside it,
/// the update is authoritative: every block entry is replaced by the updated
/// entries the block admits, and any entry whose source id is no longer
/// asserted, or is now asserted for a different item, becomes stale. An
/// entry anywhere in the blocks whose source id is now asserted for a
/// different item is stale content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleBlockUpdater;

impl ScheduleBlockUpdater {
    pub fn new() -> Self {
        Self
    }

    /// Compute new block contents and the entries made stale by `updated_schedule`.
    ///
    /// `stale_blocks` hold entries from earlier passes that may still need
    /// retracting; any of their entries absent from the new blocks is
    /// reported stale, and any present in them is not.
    pub fn update_blocks(
        &self,
        current_blocks: &[ChannelSchedule],
        stale_blocks: &[ChannelSchedule],
        updated_schedule: &[ItemAndBroadcast],
        channel: &Channel,
        interval: &Interval,
    ) -> Result<ScheduleBlocksUpdate, ScheduleError> {
        let valid_ids = index_source_ids(updated_schedule)?;
        let in_update = |entry: &ItemAndBroadcast| {
            broadcast_in_scope(&entry.broadcast, channel.id, interval)
        };

        let mut stale_entries = HashSet::new();
        let mut stale_content = HashSet::new();
        let mut updated_blocks = Vec::with_capacity(current_blocks.len());

        for block in current_blocks {
            let mut survivors = Vec::new();
            for entry in block.entries() {
                let asserted_for = entry.source_id().and_then(|id| valid_ids.get(id));
                let reattached = asserted_for.is_some_and(|item| *item != entry.item_id());
                if reattached {
                    stale_content.insert(entry.clone());
                }
                if !in_update(entry) {
                    survivors.push(entry);
                    continue;
                }
                // An entry still asserted for the same item is replaced by
                // its updated copy wherever a block admits it.
                if asserted_for.is_none() || reattached {
                    stale_entries.insert(entry.clone());
                }
            }

            // Survivors come first so an updated entry never displaces one.
            let admitted = updated_schedule
                .iter()
                .filter(|entry| block.admits(&entry.broadcast));
            let entries = distinct(survivors.into_iter().chain(admitted));
            updated_blocks.push(block.copy_with_entries(entries));
        }

        let current: HashSet<&ItemAndBroadcast> = updated_blocks
            .iter()
            .flat_map(|block| block.entries())
            .collect();

        // A previously stale broadcast that is current again must not be
        // flagged, or its actively published state would flip off and on.
        for past in stale_blocks {
            for entry in past.entries() {
                if !current.contains(entry) {
                    stale_entries.insert(entry.clone());
                }
            }
        }

        tracing::trace!(
            channel = %channel.id,
            %interval,
            blocks = updated_blocks.len(),
            stale = stale_entries.len(),
            stale_content = stale_content.len(),
            "reconciled schedule blocks"
        );

        Ok(ScheduleBlocksUpdate::new(
            updated_blocks,
            stale_entries,
            stale_content,
        ))
    }
}

/// Map each source id in the update to the item it is attached to.
fn index_source_ids(
    updated_schedule: &[ItemAndBroadcast],
) -> Result<HashMap<&str, Id>, ScheduleError> {
    let mut index = HashMap::with_capacity(updated_schedule.len());
    for entry in updated_schedule {
        let source_id = entry.source_id().ok_or(ScheduleError::MissingSourceId {
            item: entry.item_id(),
            channel: entry.broadcast.channel_id(),
        })?;
        match index.entry(source_id) {
            Entry::Vacant(slot) => {
                slot.insert(entry.item_id());
            }
            Entry::Occupied(existing) => {
                return Err(ScheduleError::DuplicateSourceId {
                    source_id: source_id.to_string(),
                    first: *existing.get(),
                    second: entry.item_id(),
                });
            }
        }
    }
    Ok(index)
}

/// First occurrence of each broadcast wins.
fn distinct<'a>(entries: impl Iterator<Item = &'a ItemAndBroadcast>) -> Vec<ItemAndBroadcast> {
    let mut seen = HashSet::new();
    entries
        .filter(|entry| seen.insert(*entry))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;
