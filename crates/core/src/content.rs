// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content model: publishers, channels, items and their broadcasts

use crate::id::Id;
use crate::interval::Interval;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Source of content, identified by key (e.g. `bbc.co.uk`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Publisher(String);

impl Publisher {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    pub id: Id,
    pub uri: String,
}

impl Channel {
    pub fn new(id: impl Into<Id>, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
        }
    }
}

/// Descriptive broadcast flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastFlags {
    pub repeat: bool,
    pub premiere: bool,
    pub live: bool,
    pub subtitled: bool,
    pub signed: bool,
    pub audio_described: bool,
    pub high_definition: bool,
    pub new_series: bool,
    pub new_episode: bool,
}

/// Identity of a broadcast.
///
/// Upstream feeds assign source ids to all of their broadcasts or to none,
/// so a broadcast is identified by its source id when it has one and by its
/// channel and transmission slot otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BroadcastKey<'a> {
    Source(&'a str),
    Slot(Id, Interval),
}

/// A single scheduled transmission of an item on a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    channel_id: Id,
    transmission: Interval,
    #[serde(default)]
    source_id: Option<String>,
    #[serde(default = "actively_published_default")]
    actively_published: bool,
    #[serde(default)]
    flags: BroadcastFlags,
}

fn actively_published_default() -> bool {
    true
}

impl Broadcast {
    pub fn new(channel_id: impl Into<Id>, transmission: Interval) -> Self {
        Self {
            channel_id: channel_id.into(),
            transmission,
            source_id: None,
            actively_published: true,
            flags: BroadcastFlags::default(),
        }
    }

    /// Set the upstream source id
    pub fn with_source_id(self, source_id: impl Into<String>) -> Self {
        Self {
            source_id: Some(source_id.into()),
            ..self
        }
    }

    pub fn with_flags(self, flags: BroadcastFlags) -> Self {
        Self { flags, ..self }
    }

    pub fn with_actively_published(self, actively_published: bool) -> Self {
        Self {
            actively_published,
            ..self
        }
    }

    /// Copy moved to a new transmission slot, keeping identity and flags
    pub fn with_transmission(&self, transmission: Interval) -> Self {
        Self {
            transmission,
            ..self.clone()
        }
    }

    pub fn channel_id(&self) -> Id {
        self.channel_id
    }

    pub fn transmission(&self) -> Interval {
        self.transmission
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.transmission.start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.transmission.end()
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    pub fn is_actively_published(&self) -> bool {
        self.actively_published
    }

    pub fn flags(&self) -> &BroadcastFlags {
        &self.flags
    }

    pub fn key(&self) -> BroadcastKey<'_> {
        match &self.source_id {
            Some(source_id) => BroadcastKey::Source(source_id),
            None => BroadcastKey::Slot(self.channel_id, self.transmission),
        }
    }

    pub fn to_ref(&self) -> BroadcastRef {
        BroadcastRef {
            source_id: self.source_id.clone(),
            channel_id: self.channel_id,
            transmission: self.transmission,
        }
    }

    /// Whether `reference` points at this broadcast, by source id or slot
    pub fn is_referenced_by(&self, reference: &BroadcastRef) -> bool {
        let same_source = match (&self.source_id, &reference.source_id) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        };
        same_source
            || (self.channel_id == reference.channel_id
                && self.transmission == reference.transmission)
    }

    /// Start-time order, shorter transmission first on a tied start
    pub fn start_order(a: &Broadcast, b: &Broadcast) -> Ordering {
        a.transmission.cmp(&b.transmission)
    }
}

impl PartialEq for Broadcast {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Broadcast {}

impl Hash for Broadcast {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Content-free broadcast identity used in schedule references
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BroadcastRef {
    pub source_id: Option<String>,
    pub channel_id: Id,
    pub transmission: Interval,
}

impl BroadcastRef {
    pub fn new(source_id: impl Into<String>, channel_id: impl Into<Id>, transmission: Interval) -> Self {
        Self {
            source_id: Some(source_id.into()),
            channel_id: channel_id.into(),
            transmission,
        }
    }
}

/// A piece of content that can be broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    pub publisher: Publisher,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub broadcasts: Vec<Broadcast>,
}

impl Item {
    pub fn new(id: impl Into<Id>, publisher: Publisher) -> Self {
        Self {
            id: id.into(),
            publisher,
            title: None,
            broadcasts: Vec::new(),
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }

    pub fn with_broadcast(mut self, broadcast: Broadcast) -> Self {
        self.broadcasts.push(broadcast);
        self
    }

    pub fn with_broadcasts(self, broadcasts: Vec<Broadcast>) -> Self {
        Self { broadcasts, ..self }
    }

    /// Copy carrying only `broadcast`, or no broadcasts if the item does not
    /// carry it
    pub fn with_only_broadcast(&self, broadcast: &Broadcast) -> Self {
        let broadcasts = self
            .broadcasts
            .iter()
            .find(|candidate| *candidate == broadcast)
            .map(|_| vec![broadcast.clone()])
            .unwrap_or_default();
        Self {
            broadcasts,
            ..self.clone()
        }
    }

    /// Actively published broadcasts only
    pub fn active_broadcasts(&self) -> impl Iterator<Item = &Broadcast> {
        self.broadcasts.iter().filter(|b| b.is_actively_published())
    }
}

/// An item paired with one of its broadcasts; the unit of a schedule.
///
/// Equality and hashing delegate to the broadcast identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAndBroadcast {
    pub item: Item,
    pub broadcast: Broadcast,
}

impl ItemAndBroadcast {
    pub fn new(item: Item, broadcast: Broadcast) -> Self {
        Self { item, broadcast }
    }

    pub fn item_id(&self) -> Id {
        self.item.id
    }

    pub fn source_id(&self) -> Option<&str> {
        self.broadcast.source_id()
    }

    pub fn start_order(a: &ItemAndBroadcast, b: &ItemAndBroadcast) -> Ordering {
        Broadcast::start_order(&a.broadcast, &b.broadcast)
    }
}

impl PartialEq for ItemAndBroadcast {
    fn eq(&self, other: &Self) -> bool {
        self.broadcast == other.broadcast
    }
}

impl Eq for ItemAndBroadcast {}

impl Hash for ItemAndBroadcast {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.broadcast.hash(state);
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
