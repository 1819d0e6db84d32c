// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::messaging::{MessageSender, MessagingError};
use crate::writer::{EquivalentScheduleWriter, WriteError};
use airtime_core::{EquivalenceGraph, Item, ScheduleUpdate, ScheduleUpdateMessage};
use async_trait::async_trait;
use tracing::Instrument;

/// Whole milliseconds in `d`, saturating at `u64::MAX`
fn elapsed_ms(d: std::time::Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Wrapper that adds tracing to any EquivalentScheduleWriter
#[derive(Clone)]
pub struct TracedEquivalentScheduleWriter<W> {
    inner: W,
}

impl<W> TracedEquivalentScheduleWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<W: EquivalentScheduleWriter> EquivalentScheduleWriter for TracedEquivalentScheduleWriter<W> {
    async fn update_schedule(&self, update: ScheduleUpdate) -> Result<(), WriteError> {
        let span = tracing::info_span!(
            "writer.update_schedule",
            source = update.source().key(),
            channel = %update.schedule().channel(),
            interval = %update.schedule().interval(),
        );
        async move {
            tracing::info!(
                entries = update.schedule().entries().len(),
                stale = update.stale_broadcasts().len(),
                "starting"
            );

            let start = std::time::Instant::now();
            let result = self.inner.update_schedule(update).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed_ms(elapsed), "schedule updated"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed_ms(elapsed),
                    error = %e,
                    "update failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn update_equivalences(&self, graphs: Vec<EquivalenceGraph>) -> Result<(), WriteError> {
        let span = tracing::info_span!("writer.update_equivalences", graphs = graphs.len());
        async move {
            let result = self.inner.update_equivalences(graphs).await;
            match &result {
                Ok(()) => tracing::debug!("equivalences updated"),
                Err(e) => tracing::error!(error = %e, "update failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn update_content(&self, items: Vec<Item>) -> Result<(), WriteError> {
        let span = tracing::info_span!("writer.update_content", items = items.len());
        async move {
            let result = self.inner.update_content(items).await;
            if let Err(e) = &result {
                tracing::error!(error = %e, "update failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any MessageSender
#[derive(Clone)]
pub struct TracedMessageSender<M> {
    inner: M,
}

impl<M> TracedMessageSender<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<M: MessageSender> MessageSender for TracedMessageSender<M> {
    async fn send(
        &self,
        message: ScheduleUpdateMessage,
        partition_key: Vec<u8>,
    ) -> Result<(), MessagingError> {
        let span = tracing::info_span!("messaging.send", message_id = message.message_id());
        async move {
            tracing::debug!(
                channel = %message.update().schedule().channel(),
                key_len = partition_key.len(),
                "sending"
            );
            let result = self.inner.send(message, partition_key).await;
            match &result {
                Ok(()) => tracing::debug!("sent"),
                Err(e) => tracing::error!(error = %e, "send failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
