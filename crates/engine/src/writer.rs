// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule write pipeline
//!
//! Reconciles a publisher's fresh schedule for a channel and interval with
//! the persisted blocks, withdraws stale broadcasts from the content store,
//! persists the new blocks and announces the change on the message bus.

use crate::deadline::deadline;
use crate::error::WriteScheduleError;
use airtime_adapters::{BlockStore, ContentStore, MessageSender};
use airtime_core::{
    BroadcastRef, Channel, ChannelSchedule, Clock, IdGen, Interval, ItemAndBroadcast, Publisher,
    ScheduleBlockUpdater, ScheduleError, ScheduleRef, ScheduleUpdate, ScheduleUpdateMessage,
};
use std::time::Duration;

/// Collaborators of a [`ScheduleWriter`]
pub struct ScheduleWriterDeps<B, C, M> {
    pub blocks: B,
    pub content: C,
    pub messages: M,
}

/// Summary of a schedule write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Blocks rewritten
    pub blocks: usize,
    /// Broadcasts withdrawn from the content store, in start order
    pub withdrawn: Vec<BroadcastRef>,
    /// Id of the update message, if one was sent
    pub message_id: Option<String>,
}

pub struct ScheduleWriter<B, C, M, K: Clock, G: IdGen> {
    blocks: B,
    content: C,
    messages: M,
    updater: ScheduleBlockUpdater,
    clock: K,
    id_gen: G,
    content_timeout: Duration,
}

impl<B, C, M, K, G> ScheduleWriter<B, C, M, K, G>
where
    B: BlockStore,
    C: ContentStore,
    M: MessageSender,
    K: Clock,
    G: IdGen,
{
    pub fn new(deps: ScheduleWriterDeps<B, C, M>, clock: K, id_gen: G, content_timeout: Duration) -> Self {
        Self {
            blocks: deps.blocks,
            content: deps.content,
            messages: deps.messages,
            updater: ScheduleBlockUpdater::new(),
            clock,
            id_gen,
            content_timeout,
        }
    }

    /// Replace the publisher's schedule for `channel` over `interval` with
    /// `entries`.
    ///
    /// Empty input is a no-op. All entries must carry source ids and come
    /// from a single publisher.
    pub async fn write_schedule(
        &self,
        entries: Vec<ItemAndBroadcast>,
        channel: &Channel,
        interval: Interval,
    ) -> Result<WriteOutcome, WriteScheduleError> {
        let Some(source) = single_source(&entries)? else {
            return Ok(WriteOutcome::default());
        };
        if let Some(entry) = entries.iter().find(|entry| entry.source_id().is_none()) {
            return Err(ScheduleError::MissingSourceId {
                item: entry.item_id(),
                channel: entry.broadcast.channel_id(),
            }
            .into());
        }

        let current = self.blocks.resolve_current_blocks(&source, channel, interval).await?;
        let stale = self.blocks.resolve_stale_blocks(&source, channel, interval).await?;
        let update = self
            .updater
            .update_blocks(&current, &stale, &entries, channel, &interval)?;

        tracing::info!(
            source = %source,
            channel = %channel.id,
            %interval,
            current = current.iter().map(|block| block.entries().len()).sum::<usize>(),
            update = entries.len(),
            stale = update.stale_entries().len(),
            stale_content = update.stale_content().len(),
            "processing schedule update"
        );

        let (updated_blocks, stale_entries, stale_content) = update.into_parts();

        let mut withdrawn: Vec<&ItemAndBroadcast> = stale_entries.union(&stale_content).collect();
        withdrawn.sort_by(|a, b| ItemAndBroadcast::start_order(a, b).then(a.item_id().cmp(&b.item_id())));
        for entry in &withdrawn {
            tracing::debug!(
                item = %entry.item_id(),
                source_id = ?entry.source_id(),
                transmission = %entry.broadcast.transmission(),
                "withdrawing stale broadcast"
            );
            let broadcast = entry.broadcast.clone().with_actively_published(false);
            deadline(
                self.content_timeout,
                "content store write",
                self.content.write_broadcast(entry.item_id(), broadcast),
            )
            .await??;
        }

        let blocks = updated_blocks.len();
        self.blocks
            .write_blocks(&source, remove_additional_broadcasts(updated_blocks))
            .await?;

        let message = ScheduleUpdateMessage::new(
            self.id_gen.next(),
            self.clock.now(),
            ScheduleUpdate::new(
                source,
                schedule_ref(&entries, channel, interval),
                stale_entries.iter().map(|entry| entry.broadcast.to_ref()),
            ),
        );
        let message_id = message.message_id().to_string();
        let partition_key = message.partition_key();
        self.messages.send(message, partition_key).await?;

        Ok(WriteOutcome {
            blocks,
            withdrawn: withdrawn.iter().map(|entry| entry.broadcast.to_ref()).collect(),
            message_id: Some(message_id),
        })
    }
}

/// The publisher shared by every entry, or `None` for no entries
fn single_source(entries: &[ItemAndBroadcast]) -> Result<Option<Publisher>, WriteScheduleError> {
    let mut publishers = entries.iter().map(|entry| &entry.item.publisher);
    let Some(first) = publishers.next() else {
        return Ok(None);
    };
    match publishers.find(|publisher| *publisher != first) {
        Some(second) => Err(WriteScheduleError::MixedSources {
            first: first.clone(),
            second: second.clone(),
        }),
        None => Ok(Some(first.clone())),
    }
}

/// Each block entry's item carries only that entry's broadcast
fn remove_additional_broadcasts(blocks: Vec<ChannelSchedule>) -> Vec<ChannelSchedule> {
    blocks
        .into_iter()
        .map(|block| {
            let entries: Vec<_> = block
                .entries()
                .iter()
                .map(|entry| {
                    ItemAndBroadcast::new(
                        entry.item.with_only_broadcast(&entry.broadcast),
                        entry.broadcast.clone(),
                    )
                })
                .collect();
            block.copy_with_entries(entries)
        })
        .collect()
}

fn schedule_ref(entries: &[ItemAndBroadcast], channel: &Channel, interval: Interval) -> ScheduleRef {
    let mut builder = ScheduleRef::for_channel(channel.id, interval);
    for entry in entries {
        builder.push_entry(entry.item_id(), entry.broadcast.to_ref());
    }
    builder.build()
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
