//! Withdrawal specs
//!
//! Verify broadcasts dropped by the feed are retracted downstream and stay
//! retracted until reasserted.

use crate::prelude::*;
use crate::prelude::assert_eq;

/// Source ids of the resolved broadcasts, comma separated
fn sources(schedule: &EquivalentSchedule) -> String {
    schedule.channel_schedules()[0]
        .entries()
        .iter()
        .filter_map(|entry| entry.broadcast().source_id())
        .collect::<Vec<_>>()
        .join(",")
}

#[tokio::test]
async fn dropped_broadcast_disappears_from_the_resolved_schedule() {
    let airtime = Airtime::new();
    airtime
        .write(vec![entry(1, "s1", hours(10, 11)), entry(2, "s2", hours(12, 13))], hours(10, 14))
        .await;
    assert_eq!(sources(&airtime.resolve(hours(10, 14), None).await).as_str(), "s1,s2");

    airtime.write(vec![entry(1, "s1", hours(10, 11))], hours(10, 14)).await;

    assert_eq!(airtime.block(), vec![1]);
    assert_eq!(sources(&airtime.resolve(hours(10, 14), None).await).as_str(), "s1");
}

#[tokio::test]
async fn stale_broadcast_is_retracted_again_on_later_passes() {
    let airtime = Airtime::new();
    airtime
        .write(vec![entry(1, "s1", hours(10, 11)), entry(2, "s2", hours(12, 13))], hours(10, 14))
        .await;
    airtime.write(vec![entry(1, "s1", hours(10, 11))], hours(10, 14)).await;

    let again = airtime.write(vec![entry(1, "s1", hours(10, 11))], hours(10, 14)).await;

    let withdrawn: Vec<Option<String>> = again.withdrawn.iter().map(|b| b.source_id.clone()).collect();
    assert_eq!(withdrawn, vec![Some("s2".to_string())]);
    let update = airtime.messages.sent()[2].message.update().clone();
    assert_eq!(update.stale_broadcasts().len(), 1);
}

#[tokio::test]
async fn reasserted_broadcast_is_no_longer_stale() {
    let airtime = Airtime::new();
    let both = || vec![entry(1, "s1", hours(10, 11)), entry(2, "s2", hours(12, 13))];
    airtime.write(both(), hours(10, 14)).await;
    airtime.write(vec![entry(1, "s1", hours(10, 11))], hours(10, 14)).await;

    airtime.write(both(), hours(10, 14)).await;
    let after = airtime.write(both(), hours(10, 14)).await;

    assert!(after.withdrawn.is_empty());
    assert_eq!(airtime.block(), vec![1, 2]);
    assert_eq!(sources(&airtime.resolve(hours(10, 14), None).await).as_str(), "s1,s2");
}
