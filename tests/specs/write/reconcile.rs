//! Schedule reconciliation specs
//!
//! Verify fresh schedules replace persisted blocks and retract what the
//! feed no longer asserts.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[tokio::test]
async fn reattached_slot_replaces_item_and_retracts_the_old_one() {
    let airtime = Airtime::new();
    airtime
        .write(vec![entry(1, "s1", hours(10, 11)), entry(2, "s2", hours(12, 13))], hours(10, 14))
        .await;
    assert_eq!(airtime.block(), vec![1, 2]);

    let outcome = airtime
        .write(vec![entry(1, "s1", hours(10, 11)), entry(3, "s2", hours(12, 13))], hours(10, 14))
        .await;

    assert_eq!(airtime.block(), vec![1, 3]);
    let withdrawn: Vec<Option<String>> = outcome.withdrawn.iter().map(|b| b.source_id.clone()).collect();
    assert_eq!(withdrawn, vec![Some("s2".to_string())]);

    let old = airtime.content.item(Id::new(2)).unwrap();
    assert!(!old.broadcasts[0].is_actively_published());
    let kept = airtime.content.item(Id::new(1)).unwrap();
    assert!(kept.broadcasts[0].is_actively_published());
}

#[tokio::test]
async fn entries_outside_the_interval_survive() {
    let airtime = Airtime::new();
    airtime
        .write(
            vec![entry(1, "s1", hours(6, 7)), entry(2, "s2", hours(12, 13))],
            hours(6, 14),
        )
        .await;

    airtime.write(vec![entry(3, "s3", hours(12, 13))], hours(10, 14)).await;

    assert_eq!(airtime.block(), vec![1, 3]);
}

#[tokio::test]
async fn rewriting_the_same_schedule_is_idempotent() {
    let airtime = Airtime::new();
    let schedule = || vec![entry(1, "s1", hours(10, 11)), entry(2, "s2", hours(12, 13))];
    airtime.write(schedule(), hours(10, 14)).await;

    let outcome = airtime.write(schedule(), hours(10, 14)).await;

    assert_eq!(airtime.block(), vec![1, 2]);
    assert!(outcome.withdrawn.is_empty());
}

#[tokio::test]
async fn each_write_announces_one_message_keyed_by_channel() {
    let airtime = Airtime::new();
    airtime.write(vec![entry(1, "s1", hours(10, 11))], hours(10, 14)).await;
    airtime.clock.set(at(10, 30));
    airtime.write(vec![entry(2, "s2", hours(10, 11))], hours(10, 14)).await;

    let sent = airtime.messages.sent();
    let ids: Vec<&str> = sent.iter().map(|m| m.message.message_id()).collect();
    assert_eq!(ids, vec!["update-1", "update-2"]);
    assert_eq!(sent[1].message.timestamp(), at(10, 30));
    assert!(sent.iter().all(|m| m.partition_key == channel().id.to_be_bytes().to_vec()));
    assert_eq!(airtime.equivalent.updates().len(), 2);
}

#[tokio::test]
async fn slot_outside_the_interval_keeps_its_item_but_retracts_reattached_content() {
    let airtime = Airtime::new();
    airtime.write(vec![entry(2, "s2", hours(12, 13))], hours(10, 14)).await;

    let outcome = airtime.write(vec![entry(3, "s2", hours(10, 11))], hours(9, 11)).await;

    assert_eq!(airtime.block(), vec![2]);
    let withdrawn: Vec<Option<String>> = outcome.withdrawn.iter().map(|b| b.source_id.clone()).collect();
    assert_eq!(withdrawn, vec![Some("s2".to_string())]);
    let old = airtime.content.item(Id::new(2)).unwrap();
    assert!(!old.broadcasts[0].is_actively_published());
    let update = airtime.messages.sent()[1].message.update().clone();
    assert!(update.stale_broadcasts().is_empty());
}
