// src/acquisition/registry.rs
//! Logical channels and their raw data sources

use crate::acquisition::tracker::BufferIndexTracker;
use crate::error::{AdcError, AdcResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier the sequencer uses for a channel (its axis number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u32);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ChannelId {
    fn from(axis: u32) -> Self {
        ChannelId(axis)
    }
}

/// One logical acquisition channel
#[derive(Debug, Clone)]
pub struct Channel {
    id: ChannelId,
    source_name: String,
    tracker: BufferIndexTracker,
}

impl Channel {
    fn new(id: ChannelId, source_name: String) -> Self {
        Self {
            id,
            source_name,
            tracker: BufferIndexTracker::new(),
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Windows already returned to the caller in the current acquisition
    pub fn consumed_windows(&self) -> usize {
        self.tracker.consumed_windows()
    }

    pub(crate) fn tracker(&self) -> &BufferIndexTracker {
        &self.tracker
    }

    pub(crate) fn tracker_mut(&mut self) -> &mut BufferIndexTracker {
        &mut self.tracker
    }
}

/// Owns every channel of a controller instance
#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    channels: BTreeMap<ChannelId, Channel>,
    capacity: usize,
    default_source: String,
}

impl ChannelRegistry {
    /// New channels start out reading `default_source`
    pub fn new(capacity: usize, default_source: impl Into<String>) -> Self {
        Self {
            channels: BTreeMap::new(),
            capacity,
            default_source: default_source.into(),
        }
    }

    pub fn add(&mut self, id: ChannelId) -> AdcResult<()> {
        if self.channels.contains_key(&id) {
            return Err(AdcError::DuplicateChannel(id));
        }
        if self.channels.len() >= self.capacity {
            return Err(AdcError::TooManyChannels {
                limit: self.capacity,
            });
        }
        self.channels
            .insert(id, Channel::new(id, self.default_source.clone()));
        Ok(())
    }

    pub fn remove(&mut self, id: ChannelId) -> AdcResult<Channel> {
        self.channels.remove(&id).ok_or(AdcError::UnknownChannel(id))
    }

    pub fn get(&self, id: ChannelId) -> AdcResult<&Channel> {
        self.channels.get(&id).ok_or(AdcError::UnknownChannel(id))
    }

    pub fn get_mut(&mut self, id: ChannelId) -> AdcResult<&mut Channel> {
        self.channels.get_mut(&id).ok_or(AdcError::UnknownChannel(id))
    }

    pub fn set_source(&mut self, id: ChannelId, name: impl Into<String>) -> AdcResult<()> {
        self.get_mut(id)?.source_name = name.into();
        Ok(())
    }

    pub fn source(&self, id: ChannelId) -> AdcResult<&str> {
        Ok(self.get(id)?.source_name())
    }

    /// Forget read progress on every channel
    pub fn reset_progress(&mut self) {
        for channel in self.channels.values_mut() {
            channel.tracker_mut().reset();
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.channels.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
