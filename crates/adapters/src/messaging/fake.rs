// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake message sender for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MessageSender, MessagingError};
use airtime_core::ScheduleUpdateMessage;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Recorded message
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub message: ScheduleUpdateMessage,
    pub partition_key: Vec<u8>,
}

#[derive(Default)]
struct SenderState {
    sent: Vec<SentMessage>,
    failure: Option<MessagingError>,
}

#[derive(Clone, Default)]
pub struct FakeMessageSender {
    inner: Arc<Mutex<SenderState>>,
}

impl FakeMessageSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every subsequent send with `error`
    pub fn fail_with(&self, error: MessagingError) {
        self.lock().failure = Some(error);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.lock().sent.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SenderState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl MessageSender for FakeMessageSender {
    async fn send(
        &self,
        message: ScheduleUpdateMessage,
        partition_key: Vec<u8>,
    ) -> Result<(), MessagingError> {
        let mut state = self.lock();
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }
        state.sent.push(SentMessage {
            message,
            partition_key,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
