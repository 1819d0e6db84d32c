//! Shared fixtures for schedule specs

pub use airtime_adapters::{
    FakeBlockStore, FakeContentStore, FakeEquivalentScheduleWriter, FakeGraphStore,
    FakeMessageSender, FakeScheduleIndex, TracedEquivalentScheduleWriter, TracedMessageSender,
};
pub use airtime_core::{
    Broadcast, Channel, EquivalenceGraph, EquivalentSchedule, FakeClock, Id, Interval, Item,
    ItemAndBroadcast, Publisher, SequentialIdGen,
};
pub use airtime_engine::{
    EngineConfig, EquivalentScheduleResolver, ResolverDeps, ScheduleUpdateWorker, ScheduleWriter,
    ScheduleWriterDeps, WriteOutcome,
};
pub use chrono::{DateTime, NaiveDate, TimeZone, Utc};
pub use similar_asserts::assert_eq;

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
}

pub fn hours(start: u32, end: u32) -> Interval {
    Interval::new(at(start, 0), at(end, 0))
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

pub fn channel() -> Channel {
    Channel::new(7, "http://channels.example.com/c")
}

pub fn pa() -> Publisher {
    Publisher::new("pressassociation.com")
}

pub fn bbc() -> Publisher {
    Publisher::new("bbc.co.uk")
}

/// An item of `publisher` carrying a single broadcast on [`channel`]
pub fn item(id: u64, publisher: Publisher, source_id: &str, transmission: Interval) -> Item {
    let broadcast = Broadcast::new(channel().id, transmission).with_source_id(source_id);
    Item::new(id, publisher).with_broadcast(broadcast)
}

pub fn entry(id: u64, source_id: &str, transmission: Interval) -> ItemAndBroadcast {
    let item = item(id, pa(), source_id, transmission);
    let broadcast = item.broadcasts[0].clone();
    ItemAndBroadcast::new(item, broadcast)
}

/// Every stage of the pipeline wired over in-memory collaborators.
///
/// Writes go through the [`ScheduleWriter`]; sent messages are delivered
/// to a [`ScheduleUpdateWorker`] and the updates it hands on are applied to
/// the schedule index the resolver reads.
pub struct Airtime {
    pub blocks: FakeBlockStore,
    pub content: FakeContentStore,
    pub messages: FakeMessageSender,
    pub equivalent: FakeEquivalentScheduleWriter,
    pub index: FakeScheduleIndex,
    pub graphs: FakeGraphStore,
    pub clock: FakeClock,
    writer: ScheduleWriter<
        FakeBlockStore,
        FakeContentStore,
        TracedMessageSender<FakeMessageSender>,
        FakeClock,
        SequentialIdGen,
    >,
    worker: ScheduleUpdateWorker<TracedEquivalentScheduleWriter<FakeEquivalentScheduleWriter>, FakeClock>,
    delivered: std::cell::Cell<usize>,
}

impl Airtime {
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let blocks = FakeBlockStore::new();
        let content = FakeContentStore::new();
        let messages = FakeMessageSender::new();
        let equivalent = FakeEquivalentScheduleWriter::new();
        let clock = FakeClock::at(at(9, 0));
        let writer = ScheduleWriter::new(
            ScheduleWriterDeps {
                blocks: blocks.clone(),
                content: content.clone(),
                messages: TracedMessageSender::new(messages.clone()),
            },
            clock.clone(),
            SequentialIdGen::new("update"),
            config.content_timeout,
        );
        let worker = ScheduleUpdateWorker::new(
            TracedEquivalentScheduleWriter::new(equivalent.clone()),
            clock.clone(),
        );
        Self {
            blocks,
            content,
            messages,
            equivalent,
            index: FakeScheduleIndex::new(),
            graphs: FakeGraphStore::new(),
            clock,
            writer,
            worker,
            delivered: std::cell::Cell::new(0),
        }
    }

    /// Write `entries` as pa's schedule for [`channel`] over `interval`,
    /// then deliver whatever the write announced
    pub async fn write(&self, entries: Vec<ItemAndBroadcast>, interval: Interval) -> WriteOutcome {
        for entry in &entries {
            if self.content.item(entry.item_id()).is_none() {
                self.content.insert(entry.item.clone());
            }
        }
        let outcome = self
            .writer
            .write_schedule(entries, &channel(), interval)
            .await
            .unwrap();
        self.deliver().await;
        outcome
    }

    async fn deliver(&self) {
        let delivered = self.delivered.get();
        for message in self.messages.sent().into_iter().skip(delivered) {
            self.worker.process(message.message).await.unwrap();
            self.delivered.set(self.delivered.get() + 1);
        }
        for update in self.equivalent.updates().into_iter().skip(delivered) {
            self.index.apply(&update);
        }
    }

    /// Item ids in the persisted block for [`day`], in schedule order
    pub fn block(&self) -> Vec<u64> {
        self.blocks
            .entries(&pa(), channel().id, day())
            .iter()
            .map(|entry| entry.item_id().value())
            .collect()
    }

    pub async fn resolve(&self, interval: Interval, count: Option<usize>) -> EquivalentSchedule {
        EquivalentScheduleResolver::new(
            ResolverDeps {
                index: self.index.clone(),
                content: self.content.clone(),
                graphs: self.graphs.clone(),
            },
            &EngineConfig::default(),
        )
        .unwrap()
        .resolve_schedules(&pa(), &[channel()], interval, count)
        .await
        .unwrap()
    }
}
