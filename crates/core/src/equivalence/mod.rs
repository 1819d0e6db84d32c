// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Equivalence between content from different publishers
//!
//! Items describing the same programme are grouped in an
//! [`EquivalenceGraph`]. Schedules composed across publishers carry, for each
//! slot, the broadcast item together with its equivalents.

pub mod compose;
mod matcher;
mod schedule;

pub use matcher::FlexibleBroadcastMatcher;
pub use schedule::{EquivalentChannelSchedule, EquivalentSchedule, EquivalentScheduleEntry};

use crate::id::Id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of items considered to be the same content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquivalenceGraph {
    id: Id,
    equivalence_set: BTreeSet<Id>,
}

impl EquivalenceGraph {
    pub fn new(id: Id, members: impl IntoIterator<Item = Id>) -> Self {
        let mut equivalence_set: BTreeSet<Id> = members.into_iter().collect();
        equivalence_set.insert(id);
        Self {
            id,
            equivalence_set,
        }
    }

    /// Graph for content that has not been equivalated yet
    pub fn singleton(id: Id) -> Self {
        Self::new(id, [])
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn equivalence_set(&self) -> &BTreeSet<Id> {
        &self.equivalence_set
    }

    pub fn contains(&self, id: Id) -> bool {
        self.equivalence_set.contains(&id)
    }
}

/// Resources resolved for the members of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equivalent<T> {
    graph: EquivalenceGraph,
    resources: Vec<T>,
}

impl<T> Equivalent<T> {
    pub fn new(graph: EquivalenceGraph, resources: Vec<T>) -> Self {
        Self { graph, resources }
    }

    pub fn graph(&self) -> &EquivalenceGraph {
        &self.graph
    }

    pub fn resources(&self) -> &[T] {
        &self.resources
    }

    pub fn into_resources(self) -> Vec<T> {
        self.resources
    }
}

#[cfg(test)]
#[path = "equivalence_tests.rs"]
mod tests;
