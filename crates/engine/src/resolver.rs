// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Equivalent schedule read path
//!
//! Resolves the id-only schedules a publisher has for each channel, the
//! equivalence graphs of every scheduled item and the content of every graph
//! member, then composes them into an [`EquivalentSchedule`].

use crate::config::{ConfigError, EngineConfig};
use crate::deadline::deadline;
use crate::error::ResolveError;
use airtime_adapters::{ContentStore, EquivalenceGraphStore, ScheduleIndex};
use airtime_core::equivalence::compose::{compose_channel_schedule, content_ids};
use airtime_core::{
    Channel, EquivalentSchedule, FlexibleBroadcastMatcher, Id, Interval, Item, Publisher,
};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

/// Collaborators of an [`EquivalentScheduleResolver`]
pub struct ResolverDeps<I, C, G> {
    pub index: I,
    pub content: C,
    pub graphs: G,
}

pub struct EquivalentScheduleResolver<I, C, G> {
    index: I,
    content: C,
    graphs: G,
    matcher: FlexibleBroadcastMatcher,
    content_timeout: Duration,
    graph_timeout: Duration,
    default_broadcast_limit: Option<usize>,
}

impl<I, C, G> EquivalentScheduleResolver<I, C, G>
where
    I: ScheduleIndex,
    C: ContentStore,
    G: EquivalenceGraphStore,
{
    pub fn new(deps: ResolverDeps<I, C, G>, config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            index: deps.index,
            content: deps.content,
            graphs: deps.graphs,
            matcher: config.broadcast_matcher()?,
            content_timeout: config.content_timeout,
            graph_timeout: config.graph_timeout,
            default_broadcast_limit: config.default_broadcast_limit,
        })
    }

    /// The equivalent schedule of `publisher` on each of `channels`.
    ///
    /// Channel schedules follow the order of `channels`. With a `count`, or
    /// a configured default limit, each is truncated to that many broadcasts.
    pub async fn resolve_schedules(
        &self,
        publisher: &Publisher,
        channels: &[Channel],
        interval: Interval,
        count: Option<usize>,
    ) -> Result<EquivalentSchedule, ResolveError> {
        let mut schedules = Vec::with_capacity(channels.len());
        for channel in channels {
            let schedule = deadline(
                self.content_timeout,
                "schedule index",
                self.index.resolve_schedule(publisher, channel.id, interval),
            )
            .await??;
            schedules.push(schedule);
        }

        let scheduled: BTreeSet<Id> = schedules
            .iter()
            .flat_map(|schedule| schedule.entries().iter().map(|entry| entry.item))
            .collect();
        let scheduled: Vec<Id> = scheduled.into_iter().collect();
        let graphs = deadline(
            self.graph_timeout,
            "equivalence graphs",
            self.graphs.resolve_graphs(&scheduled),
        )
        .await??;

        let ids: BTreeSet<Id> = schedules
            .iter()
            .flat_map(|schedule| content_ids(schedule, &graphs))
            .collect();
        let ids: Vec<Id> = ids.into_iter().collect();
        let items: HashMap<Id, Item> = deadline(
            self.content_timeout,
            "content",
            self.content.resolve_items(&ids),
        )
        .await??
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

        tracing::debug!(
            publisher = %publisher,
            channels = channels.len(),
            %interval,
            scheduled = scheduled.len(),
            graphs = graphs.len(),
            items = items.len(),
            "resolved schedule content"
        );

        let channel_schedules = channels
            .iter()
            .zip(&schedules)
            .map(|(channel, schedule)| {
                compose_channel_schedule(channel, schedule, &items, &graphs, &self.matcher)
            })
            .collect();
        let schedule = EquivalentSchedule::new(interval, channel_schedules);

        Ok(match count.or(self.default_broadcast_limit) {
            Some(count) => schedule.with_limited_broadcasts(count),
            None => schedule,
        })
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
