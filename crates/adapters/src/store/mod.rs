// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence adapters for schedules, content and equivalence graphs

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{
    BlockStoreCall, ContentStoreCall, FakeBlockStore, FakeContentStore, FakeGraphStore,
    FakeScheduleIndex,
};

use airtime_core::{
    Broadcast, Channel, ChannelSchedule, EquivalenceGraph, Id, Interval, Item, Publisher,
    ScheduleRef,
};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Block-partitioned persistence of a publisher's channel schedules.
///
/// Blocks are contiguous and of regular duration. An entry overhanging a
/// block boundary is stored in every block it overlaps.
#[async_trait]
pub trait BlockStore: Clone + Send + Sync + 'static {
    /// Every block overlapped by `interval`, empty blocks included
    async fn resolve_current_blocks(
        &self,
        publisher: &Publisher,
        channel: &Channel,
        interval: Interval,
    ) -> Result<Vec<ChannelSchedule>, StoreError>;

    /// Entries dropped from the blocks overlapped by `interval` that may
    /// still need retracting; empty if the store does not keep them
    async fn resolve_stale_blocks(
        &self,
        publisher: &Publisher,
        channel: &Channel,
        interval: Interval,
    ) -> Result<Vec<ChannelSchedule>, StoreError>;

    async fn write_blocks(
        &self,
        publisher: &Publisher,
        blocks: Vec<ChannelSchedule>,
    ) -> Result<(), StoreError>;
}

/// Item persistence
#[async_trait]
pub trait ContentStore: Clone + Send + Sync + 'static {
    /// Items for the ids that exist; unknown ids are omitted
    async fn resolve_items(&self, ids: &[Id]) -> Result<Vec<Item>, StoreError>;

    /// Replace the broadcast of `item_id` sharing identity with `broadcast`
    async fn write_broadcast(&self, item_id: Id, broadcast: Broadcast) -> Result<(), StoreError>;
}

#[async_trait]
pub trait EquivalenceGraphStore: Clone + Send + Sync + 'static {
    /// Graphs keyed by the requested item id; items without a graph are absent
    async fn resolve_graphs(&self, ids: &[Id]) -> Result<HashMap<Id, EquivalenceGraph>, StoreError>;
}

/// Index of the id-only schedule each publisher currently asserts
#[async_trait]
pub trait ScheduleIndex: Clone + Send + Sync + 'static {
    async fn resolve_schedule(
        &self,
        publisher: &Publisher,
        channel_id: Id,
        interval: Interval,
    ) -> Result<ScheduleRef, StoreError>;
}
