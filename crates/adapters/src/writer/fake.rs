// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake equivalent schedule writer for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{EquivalentScheduleWriter, WriteError};
use airtime_core::{EquivalenceGraph, Item, ScheduleUpdate};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Recorded writer call
#[derive(Debug, Clone, PartialEq)]
pub enum WriterCall {
    UpdateSchedule(ScheduleUpdate),
    UpdateEquivalences(Vec<EquivalenceGraph>),
    UpdateContent(Vec<Item>),
}

#[derive(Default)]
struct WriterState {
    calls: Vec<WriterCall>,
    failures: VecDeque<WriteError>,
}

/// Records every call; queued failures are returned one per call
#[derive(Clone, Default)]
pub struct FakeEquivalentScheduleWriter {
    inner: Arc<Mutex<WriterState>>,
}

impl FakeEquivalentScheduleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next call with `error`
    pub fn fail_next(&self, error: WriteError) {
        self.lock().failures.push_back(error);
    }

    pub fn calls(&self) -> Vec<WriterCall> {
        self.lock().calls.clone()
    }

    /// Schedule updates received, in order
    pub fn updates(&self) -> Vec<ScheduleUpdate> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                WriterCall::UpdateSchedule(update) => Some(update.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WriterState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: WriterCall) -> Result<(), WriteError> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EquivalentScheduleWriter for FakeEquivalentScheduleWriter {
    async fn update_schedule(&self, update: ScheduleUpdate) -> Result<(), WriteError> {
        self.record(WriterCall::UpdateSchedule(update))
    }

    async fn update_equivalences(&self, graphs: Vec<EquivalenceGraph>) -> Result<(), WriteError> {
        self.record(WriterCall::UpdateEquivalences(graphs))
    }

    async fn update_content(&self, items: Vec<Item>) -> Result<(), WriteError> {
        self.record(WriterCall::UpdateContent(items))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
