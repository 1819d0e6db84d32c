// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for schedule persistence, content, graphs and messaging

pub mod messaging;
pub mod store;
pub mod traced;
pub mod writer;

pub use messaging::{MessageSender, MessagingError};
pub use store::{BlockStore, ContentStore, EquivalenceGraphStore, ScheduleIndex, StoreError};
pub use traced::{TracedEquivalentScheduleWriter, TracedMessageSender};
pub use writer::{EquivalentScheduleWriter, WriteError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use messaging::{FakeMessageSender, SentMessage};
#[cfg(any(test, feature = "test-support"))]
pub use store::{
    BlockStoreCall, ContentStoreCall, FakeBlockStore, FakeContentStore, FakeGraphStore,
    FakeScheduleIndex,
};
#[cfg(any(test, feature = "test-support"))]
pub use writer::{FakeEquivalentScheduleWriter, WriterCall};
