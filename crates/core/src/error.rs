// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by schedule reconciliation

use crate::id::Id;
use thiserror::Error;

/// Malformed reconciliation input. These indicate a broken upstream data
/// contract and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("duplicate broadcast source id {source_id} in update (items {first} and {second})")]
    DuplicateSourceId {
        source_id: String,
        first: Id,
        second: Id,
    },
    #[error("broadcast of item {item} on channel {channel} has no source id")]
    MissingSourceId { item: Id, channel: Id },
}

impl ScheduleError {
    pub fn is_retryable(&self) -> bool {
        false
    }
}
