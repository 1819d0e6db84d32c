//! Behavioral specifications for the airtime schedule pipeline.
//!
//! These tests are black-box over the public crate APIs: schedules are
//! written through the engine, delivered to the worker and read back
//! through the resolver, with every collaborator faked in memory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// write/
#[path = "specs/write/reconcile.rs"]
mod write_reconcile;
#[path = "specs/write/withdraw.rs"]
mod write_withdraw;

// read/
#[path = "specs/read/equivalence.rs"]
mod read_equivalence;
