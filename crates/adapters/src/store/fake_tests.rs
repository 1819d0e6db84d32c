// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{DateTime, TimeZone, Utc};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn channel() -> Channel {
    Channel::new(1, "http://channels.example.com/one")
}

fn bbc() -> Publisher {
    Publisher::new("bbc.co.uk")
}

fn entry(item: u64, source_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ItemAndBroadcast {
    let broadcast = Broadcast::new(1, Interval::new(start, end)).with_source_id(source_id);
    ItemAndBroadcast::new(Item::new(item, bbc()).with_broadcast(broadcast.clone()), broadcast)
}

#[tokio::test]
async fn unknown_days_resolve_to_empty_blocks() {
    let store = FakeBlockStore::new();

    let blocks = store
        .resolve_current_blocks(&bbc(), &channel(), Interval::new(at(1, 22), at(2, 2)))
        .await
        .unwrap();

    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|block| block.is_empty()));
    assert_eq!(blocks[0].interval(), Interval::day(date(1)));
    assert_eq!(blocks[1].interval(), Interval::day(date(2)));
}

#[tokio::test]
async fn written_blocks_resolve_back() {
    let store = FakeBlockStore::new();
    let block = ChannelSchedule::new(channel(), Interval::day(date(1)), vec![entry(1, "a", at(1, 10), at(1, 11))]);

    store.write_blocks(&bbc(), vec![block.clone()]).await.unwrap();
    let blocks = store
        .resolve_current_blocks(&bbc(), &channel(), Interval::new(at(1, 9), at(1, 12)))
        .await
        .unwrap();

    assert_eq!(blocks, vec![block]);
}

#[tokio::test]
async fn overwritten_entries_become_stale_until_rewritten() {
    let store = FakeBlockStore::new();
    let a = entry(1, "a", at(1, 10), at(1, 11));
    let b = entry(2, "b", at(1, 11), at(1, 12));
    let day = Interval::day(date(1));

    store
        .write_blocks(&bbc(), vec![ChannelSchedule::new(channel(), day, vec![a.clone(), b.clone()])])
        .await
        .unwrap();
    store
        .write_blocks(&bbc(), vec![ChannelSchedule::new(channel(), day, vec![a.clone()])])
        .await
        .unwrap();
    assert_eq!(store.stale_entries(&bbc(), Id::new(1), date(1)), vec![b.clone()]);

    let stale = store.resolve_stale_blocks(&bbc(), &channel(), day).await.unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].entries(), &[b.clone()]);

    store
        .write_blocks(&bbc(), vec![ChannelSchedule::new(channel(), day, vec![a, b])])
        .await
        .unwrap();
    assert!(store.stale_entries(&bbc(), Id::new(1), date(1)).is_empty());
}

#[tokio::test]
async fn block_store_failure_is_reported_and_recorded() {
    let store = FakeBlockStore::new();
    store.fail_with(StoreError::Unavailable("down".into()));

    let result = store
        .resolve_current_blocks(&bbc(), &channel(), Interval::day(date(1)))
        .await;

    assert_eq!(result, Err(StoreError::Unavailable("down".into())));
    assert!(matches!(store.calls()[0], BlockStoreCall::ResolveCurrent { .. }));
}

#[tokio::test]
async fn content_store_resolves_known_items_only() {
    let store = FakeContentStore::with_items(vec![Item::new(1, bbc()), Item::new(2, bbc())]);

    let items = store.resolve_items(&[Id::new(2), Id::new(9)]).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, Id::new(2));
    assert_eq!(store.calls(), vec![ContentStoreCall::ResolveItems(vec![Id::new(2), Id::new(9)])]);
}

#[tokio::test]
async fn write_broadcast_replaces_matching_broadcast() {
    let broadcast = Broadcast::new(1, Interval::new(at(1, 10), at(1, 11))).with_source_id("a");
    let store = FakeContentStore::with_items(vec![Item::new(1, bbc()).with_broadcast(broadcast.clone())]);

    store
        .write_broadcast(Id::new(1), broadcast.with_actively_published(false))
        .await
        .unwrap();

    let item = store.item(Id::new(1)).unwrap();
    assert_eq!(item.broadcasts.len(), 1);
    assert!(!item.broadcasts[0].is_actively_published());
}

#[tokio::test]
async fn write_broadcast_to_unknown_item_fails() {
    let store = FakeContentStore::new();
    let broadcast = Broadcast::new(1, Interval::new(at(1, 10), at(1, 11)));

    let result = store.write_broadcast(Id::new(3), broadcast).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn graph_store_indexes_every_member() {
    let store = FakeGraphStore::new();
    let graph = EquivalenceGraph::new(Id::new(1), [Id::new(2)]);
    store.insert(graph.clone());

    let graphs = store.resolve_graphs(&[Id::new(2), Id::new(5)]).await.unwrap();

    assert_eq!(graphs.len(), 1);
    assert_eq!(graphs.get(&Id::new(2)), Some(&graph));
}

#[tokio::test]
async fn schedule_index_applies_retractions_before_upserts() {
    let index = FakeScheduleIndex::new();
    let slot = Interval::new(at(1, 10), at(1, 11));
    let first = ScheduleRef::for_channel(Id::new(1), Interval::day(date(1)))
        .add_entry(Id::new(1), BroadcastRef::new("a", 1, slot))
        .build();
    index.apply(&ScheduleUpdate::new(bbc(), first, vec![]));

    let second = ScheduleRef::for_channel(Id::new(1), Interval::day(date(1)))
        .add_entry(Id::new(2), BroadcastRef::new("b", 1, slot))
        .build();
    index.apply(&ScheduleUpdate::new(bbc(), second, vec![BroadcastRef::new("a", 1, slot)]));

    let schedule = index
        .resolve_schedule(&bbc(), Id::new(1), Interval::day(date(1)))
        .await
        .unwrap();
    let items: Vec<Id> = schedule.entries().iter().map(|entry| entry.item).collect();
    assert_eq!(items, vec![Id::new(2)]);
}

#[tokio::test]
async fn schedule_index_filters_by_interval() {
    let index = FakeScheduleIndex::new();
    let schedule = ScheduleRef::for_channel(Id::new(1), Interval::day(date(1)))
        .add_entry(Id::new(1), BroadcastRef::new("a", 1, Interval::new(at(1, 10), at(1, 11))))
        .add_entry(Id::new(2), BroadcastRef::new("b", 1, Interval::new(at(1, 20), at(1, 21))))
        .build();
    index.apply(&ScheduleUpdate::new(bbc(), schedule, vec![]));

    let resolved = index
        .resolve_schedule(&bbc(), Id::new(1), Interval::new(at(1, 9), at(1, 12)))
        .await
        .unwrap();

    assert_eq!(resolved.entries().len(), 1);
    assert_eq!(resolved.interval(), Interval::new(at(1, 9), at(1, 12)));
}
