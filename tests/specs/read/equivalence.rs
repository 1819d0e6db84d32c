//! Equivalent schedule specs
//!
//! Verify written schedules resolve with the matching content of other
//! publishers attached to each slot.

use crate::prelude::*;
use crate::prelude::assert_eq;

fn resources(schedule: &EquivalentSchedule, entry: usize) -> Vec<(String, u64, usize)> {
    schedule.channel_schedules()[0].entries()[entry]
        .items()
        .resources()
        .iter()
        .map(|item| (item.publisher.key().to_string(), item.id.value(), item.broadcasts.len()))
        .collect()
}

fn bbc_item(id: u64, transmission: Interval) -> Item {
    item(id, bbc(), &format!("bbc-{id}"), transmission)
}

#[tokio::test]
async fn slot_carries_matching_broadcasts_of_equivalent_items() {
    let airtime = Airtime::new();
    airtime.content.insert(bbc_item(20, Interval::new(at(10, 5), at(11, 0))));
    airtime
        .graphs
        .insert(EquivalenceGraph::new(Id::new(1), [Id::new(1), Id::new(20)]));
    airtime.write(vec![entry(1, "s1", hours(10, 11))], hours(10, 14)).await;

    let schedule = airtime.resolve(hours(10, 14), None).await;

    assert_eq!(
        resources(&schedule, 0),
        vec![
            ("pressassociation.com".to_string(), 1, 1),
            ("bbc.co.uk".to_string(), 20, 1),
        ]
    );
}

#[tokio::test]
async fn equivalent_without_a_matching_broadcast_is_attached_bare() {
    let airtime = Airtime::new();
    airtime.content.insert(bbc_item(20, hours(18, 19)));
    airtime
        .graphs
        .insert(EquivalenceGraph::new(Id::new(1), [Id::new(1), Id::new(20)]));
    airtime.write(vec![entry(1, "s1", hours(10, 11))], hours(10, 14)).await;

    let schedule = airtime.resolve(hours(10, 14), None).await;

    assert_eq!(
        resources(&schedule, 0),
        vec![
            ("pressassociation.com".to_string(), 1, 1),
            ("bbc.co.uk".to_string(), 20, 0),
        ]
    );
}

#[tokio::test]
async fn first_matching_item_represents_its_publisher() {
    let airtime = Airtime::new();
    airtime.content.insert(bbc_item(20, hours(18, 19)));
    airtime.content.insert(bbc_item(21, Interval::new(at(9, 55), at(11, 0))));
    airtime.content.insert(bbc_item(22, hours(10, 11)));
    airtime.graphs.insert(EquivalenceGraph::new(
        Id::new(1),
        [Id::new(1), Id::new(20), Id::new(21), Id::new(22)],
    ));
    airtime.write(vec![entry(1, "s1", hours(10, 11))], hours(10, 14)).await;

    let schedule = airtime.resolve(hours(10, 14), None).await;

    assert_eq!(
        resources(&schedule, 0),
        vec![
            ("pressassociation.com".to_string(), 1, 1),
            ("bbc.co.uk".to_string(), 21, 1),
        ]
    );
}

#[tokio::test]
async fn count_limits_resolved_broadcasts() {
    let airtime = Airtime::new();
    airtime
        .write(
            vec![
                entry(1, "s1", hours(10, 11)),
                entry(2, "s2", hours(11, 12)),
                entry(3, "s3", hours(12, 13)),
            ],
            hours(10, 14),
        )
        .await;

    let schedule = airtime.resolve(hours(10, 14), Some(2)).await;

    let starts: Vec<DateTime<Utc>> = schedule.channel_schedules()[0]
        .entries()
        .iter()
        .map(|entry| entry.broadcast().start())
        .collect();
    assert_eq!(starts, vec![at(10, 0), at(11, 0)]);
    assert_eq!(schedule.interval(), Interval::new(at(10, 0), at(12, 0)));
}
