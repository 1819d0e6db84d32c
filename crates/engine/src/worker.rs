// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumer of schedule update messages

use crate::deadline::millis;
use crate::error::WorkerError;
use airtime_adapters::EquivalentScheduleWriter;
use airtime_core::{Clock, ScheduleUpdateMessage};
use std::time::Instant;

/// Hands each received schedule update to the equivalent schedule writer
pub struct ScheduleUpdateWorker<W, K> {
    writer: W,
    clock: K,
}

impl<W: EquivalentScheduleWriter, K: Clock> ScheduleUpdateWorker<W, K> {
    pub fn new(writer: W, clock: K) -> Self {
        Self { writer, clock }
    }

    /// Process one message.
    ///
    /// A message whose entries stray from its schedule's channel can never
    /// succeed and is `Fatal`; writer failures are `Recoverable`.
    pub async fn process(&self, message: ScheduleUpdateMessage) -> Result<(), WorkerError> {
        let started = Instant::now();
        let message_id = message.message_id().to_string();
        let timestamp = message.timestamp();
        let update = message.into_update();

        let channel = update.schedule().channel();
        if let Some(stray) = update
            .schedule()
            .entries()
            .iter()
            .find(|entry| entry.broadcast.channel_id != channel)
        {
            tracing::error!(
                message_id = %message_id,
                channel = %channel,
                entry_channel = %stray.broadcast.channel_id,
                "schedule entry on wrong channel"
            );
            return Err(WorkerError::Fatal(format!(
                "message {} has an entry on channel {} in a schedule for channel {}",
                message_id, stray.broadcast.channel_id, channel
            )));
        }

        let source = update.source().clone();
        self.writer
            .update_schedule(update)
            .await
            .map_err(WorkerError::Recoverable)?;

        let latency_ms = (self.clock.now() - timestamp).num_milliseconds().max(0);
        tracing::info!(
            message_id = %message_id,
            source = %source,
            channel = %channel,
            elapsed_ms = millis(started.elapsed()),
            latency_ms,
            "processed schedule update"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
