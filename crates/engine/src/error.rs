// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the schedule engine

use airtime_adapters::{MessagingError, StoreError, WriteError};
use airtime_core::{Publisher, ScheduleError};
use thiserror::Error;

/// Errors writing a publisher's schedule
#[derive(Debug, Error)]
pub enum WriteScheduleError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("messaging error: {0}")]
    Messaging(#[from] MessagingError),
    #[error("content must be from a single source, found {first} and {second}")]
    MixedSources { first: Publisher, second: Publisher },
    #[error("timed out after {elapsed_ms}ms waiting for {operation}")]
    Timeout { operation: &'static str, elapsed_ms: u64 },
}

impl WriteScheduleError {
    /// Store and messaging failures may succeed on redelivery; malformed
    /// input never will
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Schedule(e) => e.is_retryable(),
            Self::MixedSources { .. } => false,
            Self::Store(_) | Self::Messaging(_) | Self::Timeout { .. } => true,
        }
    }
}

/// Errors resolving equivalent schedules
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("timed out after {elapsed_ms}ms waiting for {operation}")]
    Timeout { operation: &'static str, elapsed_ms: u64 },
}

/// Outcome of a failed worker delivery
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The message should be redelivered
    #[error("recoverable: {0}")]
    Recoverable(#[source] WriteError),
    #[error("fatal: {0}")]
    Fatal(String),
}
