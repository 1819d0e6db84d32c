// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Equivalent schedule write adapters

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeEquivalentScheduleWriter, WriterCall};

use airtime_core::{EquivalenceGraph, Item, ScheduleUpdate};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from equivalent schedule writes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("write timed out: {0}")]
    Timeout(String),
    #[error("write failed: {0}")]
    Failed(String),
}

/// Maintains the equivalence-aware view of every publisher's schedule
#[async_trait]
pub trait EquivalentScheduleWriter: Clone + Send + Sync + 'static {
    /// Apply a reconciled schedule: retract `stale_broadcasts`, then store
    /// the schedule's entries with their equivalent content
    async fn update_schedule(&self, update: ScheduleUpdate) -> Result<(), WriteError>;

    /// Rewrite the slots of every member of the changed graphs
    async fn update_equivalences(&self, graphs: Vec<EquivalenceGraph>) -> Result<(), WriteError>;

    /// Refresh stored copies of changed items
    async fn update_content(&self, items: Vec<Item>) -> Result<(), WriteError>;
}
