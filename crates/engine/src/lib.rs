// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Airtime schedule engine
//!
//! Write path ([`ScheduleWriter`]), message consumer
//! ([`ScheduleUpdateWorker`]) and read path ([`EquivalentScheduleResolver`])
//! over the collaborators in `airtime-adapters`.

mod config;
mod deadline;
mod error;
mod resolver;
mod worker;
mod writer;

pub use config::{ConfigError, EngineConfig};
pub use error::{ResolveError, WorkerError, WriteScheduleError};
pub use resolver::{EquivalentScheduleResolver, ResolverDeps};
pub use worker::ScheduleUpdateWorker;
pub use writer::{ScheduleWriter, ScheduleWriterDeps, WriteOutcome};
