// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composing equivalent schedule entries from resolved content
//!
//! Given an id-only [`ScheduleRef`], the items it points at and their
//! equivalence graphs, each slot is joined with the equivalent items of
//! every other publisher, matched on broadcast times.

use super::{
    EquivalenceGraph, Equivalent, EquivalentChannelSchedule, EquivalentScheduleEntry,
    FlexibleBroadcastMatcher,
};
use crate::content::{Broadcast, Channel, Item, Publisher};
use crate::id::Id;
use crate::schedule::{ScheduleRef, ScheduleRefEntry};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Ids of every item needed to compose `schedule`: the scheduled items and
/// all members of their graphs.
pub fn content_ids(schedule: &ScheduleRef, graphs: &HashMap<Id, EquivalenceGraph>) -> BTreeSet<Id> {
    let mut ids = BTreeSet::new();
    for entry in schedule.entries() {
        ids.insert(entry.item);
        if let Some(graph) = graphs.get(&entry.item) {
            ids.extend(graph.equivalence_set().iter().copied());
        }
    }
    ids
}

/// Join each schedule entry with its equivalent content.
///
/// Entries whose item, or whose broadcast on that item, cannot be found are
/// skipped with a warning.
pub fn compose_entries(
    schedule: &ScheduleRef,
    items: &HashMap<Id, Item>,
    graphs: &HashMap<Id, EquivalenceGraph>,
    matcher: &FlexibleBroadcastMatcher,
) -> Vec<(ScheduleRefEntry, EquivalentScheduleEntry)> {
    let mut composed = Vec::with_capacity(schedule.entries().len());
    for entry in schedule.entries() {
        let Some(item) = items.get(&entry.item) else {
            tracing::warn!(item = %entry.item, channel = %entry.broadcast.channel_id, "no item for schedule entry");
            continue;
        };
        let Some(broadcast) = item
            .broadcasts
            .iter()
            .find(|broadcast| broadcast.is_referenced_by(&entry.broadcast))
        else {
            tracing::warn!(
                item = %entry.item,
                source_id = ?entry.broadcast.source_id,
                transmission = %entry.broadcast.transmission,
                "no broadcast for schedule entry"
            );
            continue;
        };

        let subject = item.with_only_broadcast(broadcast);
        let graph = graphs
            .get(&item.id)
            .cloned()
            .unwrap_or_else(|| EquivalenceGraph::singleton(item.id));
        let members = graph_items(&graph, items);
        let equivalents = equivalent_items(subject, broadcast, &members, matcher);

        composed.push((
            entry.clone(),
            EquivalentScheduleEntry::create(broadcast.clone(), item.id, Equivalent::new(graph, equivalents)),
        ));
    }
    composed
}

/// Compose the equivalent schedule of one channel.
pub fn compose_channel_schedule(
    channel: &Channel,
    schedule: &ScheduleRef,
    items: &HashMap<Id, Item>,
    graphs: &HashMap<Id, EquivalenceGraph>,
    matcher: &FlexibleBroadcastMatcher,
) -> EquivalentChannelSchedule {
    let entries = compose_entries(schedule, items, graphs, matcher)
        .into_iter()
        .map(|(_, entry)| entry);
    EquivalentChannelSchedule::new(channel.clone(), schedule.interval(), entries)
}

/// The subject item followed by one representative per other publisher.
///
/// A publisher's representative is its first item with an actively
/// published broadcast matching `broadcast`, reduced to that broadcast. A
/// publisher without one contributes all of its items, each carrying only a
/// matching broadcast, which in that case is none.
pub fn equivalent_items(
    subject: Item,
    broadcast: &Broadcast,
    members: &[&Item],
    matcher: &FlexibleBroadcastMatcher,
) -> Vec<Item> {
    let mut by_publisher: BTreeMap<&Publisher, Vec<&Item>> = BTreeMap::new();
    for &item in members {
        by_publisher.entry(&item.publisher).or_default().push(item);
    }

    let mut seen = HashSet::from([subject.id]);
    let mut selected = Vec::new();
    for (publisher, candidates) in by_publisher {
        if *publisher == subject.publisher {
            continue;
        }
        let best = candidates
            .iter()
            .find(|item| matching_broadcast(item, broadcast, matcher).is_some());
        let chosen: Vec<&Item> = match best {
            Some(item) => vec![*item],
            None => candidates,
        };
        for item in chosen {
            if seen.insert(item.id) {
                selected.push(reduce_to_match(item, broadcast, matcher));
            }
        }
    }

    let mut equivalents = Vec::with_capacity(selected.len() + 1);
    equivalents.push(subject);
    equivalents.extend(selected);
    equivalents
}

fn graph_items<'a>(graph: &EquivalenceGraph, items: &'a HashMap<Id, Item>) -> Vec<&'a Item> {
    graph
        .equivalence_set()
        .iter()
        .filter_map(|id| items.get(id))
        .collect()
}

fn matching_broadcast<'a>(
    item: &'a Item,
    subject: &Broadcast,
    matcher: &FlexibleBroadcastMatcher,
) -> Option<&'a Broadcast> {
    matcher.find_matching_broadcast(subject, item.active_broadcasts())
}

fn reduce_to_match(item: &Item, subject: &Broadcast, matcher: &FlexibleBroadcastMatcher) -> Item {
    let broadcasts = matching_broadcast(item, subject, matcher)
        .map(|broadcast| vec![broadcast.clone()])
        .unwrap_or_default();
    item.clone().with_broadcasts(broadcasts)
}

#[cfg(test)]
#[path = "compose_tests.rs"]
mod tests;
