// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory stores for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BlockStore, ContentStore, EquivalenceGraphStore, ScheduleIndex, StoreError};
use airtime_core::{
    Broadcast, BroadcastRef, Channel, ChannelSchedule, EquivalenceGraph, Id, Interval, Item,
    ItemAndBroadcast, Publisher, ScheduleChange, ScheduleRef, ScheduleRefEntry, ScheduleUpdate,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded block store call
#[derive(Debug, Clone, PartialEq)]
pub enum BlockStoreCall {
    ResolveCurrent {
        publisher: Publisher,
        channel: Id,
        interval: Interval,
    },
    ResolveStale {
        publisher: Publisher,
        channel: Id,
        interval: Interval,
    },
    Write {
        publisher: Publisher,
        blocks: Vec<ChannelSchedule>,
    },
}

#[derive(Debug, Clone, Default)]
struct DayBlock {
    current: Vec<ItemAndBroadcast>,
    stale: Vec<ItemAndBroadcast>,
}

#[derive(Default)]
struct BlockState {
    days: HashMap<(Publisher, Id, NaiveDate), DayBlock>,
    calls: Vec<BlockStoreCall>,
    failure: Option<StoreError>,
}

/// Block store partitioned into UTC days.
///
/// Entries dropped by a write are kept as stale until they are written
/// again, so later passes can still retract them.
#[derive(Clone, Default)]
pub struct FakeBlockStore {
    inner: Arc<Mutex<BlockState>>,
}

impl FakeBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `error`
    pub fn fail_with(&self, error: StoreError) {
        self.lock().failure = Some(error);
    }

    pub fn calls(&self) -> Vec<BlockStoreCall> {
        self.lock().calls.clone()
    }

    /// Current entries of a day, in start order
    pub fn entries(&self, publisher: &Publisher, channel: Id, day: NaiveDate) -> Vec<ItemAndBroadcast> {
        self.day(publisher, channel, day).current
    }

    /// Entries dropped from a day and not written since
    pub fn stale_entries(&self, publisher: &Publisher, channel: Id, day: NaiveDate) -> Vec<ItemAndBroadcast> {
        self.day(publisher, channel, day).stale
    }

    fn day(&self, publisher: &Publisher, channel: Id, day: NaiveDate) -> DayBlock {
        self.lock()
            .days
            .get(&(publisher.clone(), channel, day))
            .cloned()
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BlockState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn blocks(
        &self,
        publisher: &Publisher,
        channel: &Channel,
        interval: Interval,
        pick: impl Fn(&DayBlock) -> &Vec<ItemAndBroadcast>,
    ) -> Vec<ChannelSchedule> {
        let state = self.lock();
        interval
            .days()
            .into_iter()
            .map(|day| {
                let entries = state
                    .days
                    .get(&(publisher.clone(), channel.id, day))
                    .map(|block| pick(block).clone())
                    .unwrap_or_default();
                ChannelSchedule::new(channel.clone(), Interval::day(day), entries)
            })
            .collect()
    }
}

#[async_trait]
impl BlockStore for FakeBlockStore {
    async fn resolve_current_blocks(
        &self,
        publisher: &Publisher,
        channel: &Channel,
        interval: Interval,
    ) -> Result<Vec<ChannelSchedule>, StoreError> {
        {
            let mut state = self.lock();
            state.calls.push(BlockStoreCall::ResolveCurrent {
                publisher: publisher.clone(),
                channel: channel.id,
                interval,
            });
            if let Some(error) = state.failure.clone() {
                return Err(error);
            }
        }
        Ok(self.blocks(publisher, channel, interval, |block| &block.current))
    }

    async fn resolve_stale_blocks(
        &self,
        publisher: &Publisher,
        channel: &Channel,
        interval: Interval,
    ) -> Result<Vec<ChannelSchedule>, StoreError> {
        {
            let mut state = self.lock();
            state.calls.push(BlockStoreCall::ResolveStale {
                publisher: publisher.clone(),
                channel: channel.id,
                interval,
            });
            if let Some(error) = state.failure.clone() {
                return Err(error);
            }
        }
        let blocks = self.blocks(publisher, channel, interval, |block| &block.stale);
        Ok(blocks.into_iter().filter(|block| !block.is_empty()).collect())
    }

    async fn write_blocks(
        &self,
        publisher: &Publisher,
        blocks: Vec<ChannelSchedule>,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(BlockStoreCall::Write {
            publisher: publisher.clone(),
            blocks: blocks.clone(),
        });
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }

        for block in blocks {
            let day = block.interval().start().date_naive();
            let key = (publisher.clone(), block.channel().id, day);
            let previous = state.days.remove(&key).unwrap_or_default();

            let written: HashSet<&ItemAndBroadcast> = block.entries().iter().collect();
            let mut seen = HashSet::new();
            let stale: Vec<ItemAndBroadcast> = previous
                .current
                .into_iter()
                .chain(previous.stale)
                .filter(|entry| !written.contains(entry) && seen.insert(entry.clone()))
                .collect();

            let current = block.into_entries();
            state.days.insert(key, DayBlock { current, stale });
        }
        Ok(())
    }
}

/// Recorded content store call
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStoreCall {
    ResolveItems(Vec<Id>),
    WriteBroadcast { item: Id, broadcast: Broadcast },
}

#[derive(Default)]
struct ContentState {
    items: HashMap<Id, Item>,
    calls: Vec<ContentStoreCall>,
    delay: Option<Duration>,
    failure: Option<StoreError>,
}

#[derive(Clone, Default)]
pub struct FakeContentStore {
    inner: Arc<Mutex<ContentState>>,
}

impl FakeContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let store = Self::new();
        for item in items {
            store.insert(item);
        }
        store
    }

    pub fn insert(&self, item: Item) {
        self.lock().items.insert(item.id, item);
    }

    pub fn item(&self, id: Id) -> Option<Item> {
        self.lock().items.get(&id).cloned()
    }

    /// Hold every call for `delay` before answering
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    pub fn fail_with(&self, error: StoreError) {
        self.lock().failure = Some(error);
    }

    pub fn calls(&self) -> Vec<ContentStoreCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ContentState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn resolve_items(&self, ids: &[Id]) -> Result<Vec<Item>, StoreError> {
        let delay = {
            let mut state = self.lock();
            state.calls.push(ContentStoreCall::ResolveItems(ids.to_vec()));
            if let Some(error) = state.failure.clone() {
                return Err(error);
            }
            state.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.lock();
        Ok(ids.iter().filter_map(|id| state.items.get(id).cloned()).collect())
    }

    async fn write_broadcast(&self, item_id: Id, broadcast: Broadcast) -> Result<(), StoreError> {
        let delay = self.lock().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.lock();
        state.calls.push(ContentStoreCall::WriteBroadcast {
            item: item_id,
            broadcast: broadcast.clone(),
        });
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }
        let item = state
            .items
            .get_mut(&item_id)
            .ok_or_else(|| StoreError::NotFound(format!("item {}", item_id)))?;
        match item.broadcasts.iter_mut().find(|existing| **existing == broadcast) {
            Some(existing) => *existing = broadcast,
            None => item.broadcasts.push(broadcast),
        }
        Ok(())
    }
}

#[derive(Default)]
struct GraphState {
    graphs: HashMap<Id, EquivalenceGraph>,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct FakeGraphStore {
    inner: Arc<Mutex<GraphState>>,
}

impl FakeGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `graph` for each of its members
    pub fn insert(&self, graph: EquivalenceGraph) {
        let mut state = self.lock();
        for member in graph.equivalence_set() {
            state.graphs.insert(*member, graph.clone());
        }
    }

    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GraphState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl EquivalenceGraphStore for FakeGraphStore {
    async fn resolve_graphs(&self, ids: &[Id]) -> Result<HashMap<Id, EquivalenceGraph>, StoreError> {
        let delay = self.lock().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.graphs.get(id).map(|graph| (*id, graph.clone())))
            .collect())
    }
}

/// Schedule index maintained by applying [`ScheduleUpdate`]s
#[derive(Clone, Default)]
pub struct FakeScheduleIndex {
    entries: Arc<Mutex<HashMap<(Publisher, Id), Vec<ScheduleRefEntry>>>>,
}

impl FakeScheduleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retract stale broadcasts, then upsert the update's entries
    pub fn apply(&self, update: &ScheduleUpdate) {
        let key = (update.source().clone(), update.schedule().channel());
        let mut index = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entries = index.entry(key).or_default();
        for change in update.apply_order() {
            match change {
                ScheduleChange::Retract(stale) => {
                    entries.retain(|entry| !same_broadcast(&entry.broadcast, stale));
                }
                ScheduleChange::Upsert(upsert) => {
                    entries.retain(|entry| !same_broadcast(&entry.broadcast, &upsert.broadcast));
                    entries.push(upsert.clone());
                }
            }
        }
    }
}

fn same_broadcast(a: &BroadcastRef, b: &BroadcastRef) -> bool {
    match (&a.source_id, &b.source_id) {
        (Some(a), Some(b)) => a == b,
        _ => a.channel_id == b.channel_id && a.transmission == b.transmission,
    }
}

#[async_trait]
impl ScheduleIndex for FakeScheduleIndex {
    async fn resolve_schedule(
        &self,
        publisher: &Publisher,
        channel_id: Id,
        interval: Interval,
    ) -> Result<ScheduleRef, StoreError> {
        let index = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut builder = ScheduleRef::for_channel(channel_id, interval);
        for entry in index.get(&(publisher.clone(), channel_id)).into_iter().flatten() {
            if interval.overlaps(&entry.broadcast.transmission) {
                builder.push_entry(entry.item, entry.broadcast.clone());
            }
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
