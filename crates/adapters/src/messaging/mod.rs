// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message bus adapters

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeMessageSender, SentMessage};

use airtime_core::ScheduleUpdateMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from message delivery
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagingError {
    #[error("message bus unavailable: {0}")]
    Unavailable(String),
    #[error("message rejected: {0}")]
    Rejected(String),
}

/// Publishes schedule updates. Messages sharing a partition key are
/// delivered in send order.
#[async_trait]
pub trait MessageSender: Clone + Send + Sync + 'static {
    async fn send(
        &self,
        message: ScheduleUpdateMessage,
        partition_key: Vec<u8>,
    ) -> Result<(), MessagingError>;
}
