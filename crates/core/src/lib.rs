// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! airtime-core: broadcast schedule model and reconciliation
//!
//! This crate provides:
//! - Content, broadcast and interval value types
//! - Block reconciliation of channel schedules against upstream updates
//! - Id-only schedule references and update messages
//! - Equivalence graphs and cross-publisher schedule composition

pub mod clock;
pub mod content;
pub mod equivalence;
pub mod error;
pub mod id;
pub mod interval;
pub mod schedule;

pub use clock::{Clock, FakeClock, SystemClock};
pub use content::{
    Broadcast, BroadcastFlags, BroadcastKey, BroadcastRef, Channel, Item, ItemAndBroadcast,
    Publisher,
};
pub use equivalence::{
    EquivalenceGraph, Equivalent, EquivalentChannelSchedule, EquivalentSchedule,
    EquivalentScheduleEntry, FlexibleBroadcastMatcher,
};
pub use error::ScheduleError;
pub use id::{Id, IdGen, SequentialIdGen, UuidIdGen};
pub use interval::Interval;
pub use schedule::{
    ChannelSchedule, Schedule, ScheduleBlockUpdater, ScheduleBlocksUpdate, ScheduleChange,
    ScheduleRef, ScheduleRefBuilder, ScheduleRefEntry, ScheduleUpdate, ScheduleUpdateMessage,
};
