//! Channels and per-node channel sets.
//!
//! A [`ChannelSet`] is the ordered view a node has of the spectrum. Order
//! matters: index-producing strategies resolve their decisions through it,
//! so two nodes that share a channel may know it under different indices.

use std::fmt;

use crate::error::RendezvousError;

/// Frequency channel, identified by id rather than by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u32);

impl Channel {
    /// Create a channel with the given id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Channel id.
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for Channel {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel {}", self.0)
    }
}

/// Ordered collection of channels, unique by id.
///
/// Only scenario construction mutates a set. Strategies borrow or clone it
/// and treat it as read-only for the rest of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSet {
    channels: Vec<Channel>,
    /// Size of the spectrum pool this set was drawn from, if known.
    max_channels: Option<usize>,
}

impl ChannelSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from channel ids, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateChannel` if an id appears twice.
    pub fn from_ids<I>(ids: I) -> Result<Self, RendezvousError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut set = Self::new();
        for id in ids {
            set.insert(Channel::new(id))?;
        }
        Ok(set)
    }

    /// Set the size of the pool the channels were drawn from.
    #[must_use]
    pub fn with_max_channels(mut self, max_channels: usize) -> Self {
        self.max_channels = Some(max_channels);
        self
    }

    /// Append a channel.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateChannel` if the set already holds this id.
    pub fn insert(&mut self, channel: Channel) -> Result<(), RendezvousError> {
        if self.contains(channel) {
            return Err(RendezvousError::DuplicateChannel { channel });
        }
        self.channels.push(channel);
        Ok(())
    }

    /// Number of channels in the set.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True if the set holds no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Upper bound on the channel count: the pool size if known, else `len()`.
    ///
    /// Informational only. Strategies map out-of-range indices by wrapping
    /// modulo `len()` and never consult this bound.
    pub fn max_channels(&self) -> usize {
        self.max_channels.unwrap_or(self.channels.len()).max(self.channels.len())
    }

    /// Channel at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Channel> {
        self.channels.get(index).copied()
    }

    /// Channel at `index mod len()`.
    ///
    /// This is the remap applied to every index a strategy produces, so an
    /// index past the end folds back into the set instead of failing.
    /// Returns `None` only for an empty set.
    pub fn wrapped(&self, index: usize) -> Option<Channel> {
        if self.channels.is_empty() {
            return None;
        }
        self.channels.get(index % self.channels.len()).copied()
    }

    /// Position of `channel` in this set.
    pub fn position(&self, channel: Channel) -> Option<usize> {
        self.channels.iter().position(|&c| c == channel)
    }

    /// True if the set holds `channel`.
    pub fn contains(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }

    /// Channels in set order.
    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().copied()
    }

    /// Channels as a slice, in set order.
    pub fn as_slice(&self) -> &[Channel] {
        &self.channels
    }

    /// Channel ids in set order.
    pub fn ids(&self) -> Vec<u32> {
        self.channels.iter().map(|c| c.id()).collect()
    }

    /// Union of several sets in first-seen order.
    ///
    /// The result's pool size is the largest pool size among the inputs.
    pub fn union<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a ChannelSet>,
    {
        let mut union = Self::new();
        for set in sets {
            for channel in set.iter() {
                if !union.contains(channel) {
                    union.channels.push(channel);
                }
            }
            union.max_channels = union.max_channels.max(set.max_channels);
        }
        union
    }
}

impl<'a> IntoIterator for &'a ChannelSet {
    type Item = Channel;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Channel>>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ids_keeps_order() {
        let set = ChannelSet::from_ids([4, 1, 7]).expect("unique ids");
        assert_eq!(set.ids(), vec![4, 1, 7]);
        assert_eq!(set.get(0), Some(Channel::new(4)));
        assert_eq!(set.position(Channel::new(7)), Some(2));
        assert_eq!(set.get(3), None);
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = ChannelSet::from_ids([1, 2, 1]).unwrap_err();
        assert_eq!(err, RendezvousError::DuplicateChannel { channel: Channel::new(1) });
    }

    #[test]
    fn wrapped_folds_indices_back() {
        let set = ChannelSet::from_ids([10, 20, 30]).expect("unique ids");
        assert_eq!(set.wrapped(0), Some(Channel::new(10)));
        assert_eq!(set.wrapped(4), Some(Channel::new(20)));
        assert_eq!(ChannelSet::new().wrapped(0), None);
    }

    #[test]
    fn max_channels_defaults_to_len() {
        let set = ChannelSet::from_ids([0, 1]).expect("unique ids");
        assert_eq!(set.max_channels(), 2);
        assert_eq!(set.with_max_channels(8).max_channels(), 8);
    }

    #[test]
    fn union_deduplicates_in_first_seen_order() {
        let a = ChannelSet::from_ids([3, 1]).expect("unique ids").with_max_channels(10);
        let b = ChannelSet::from_ids([1, 5, 3, 0]).expect("unique ids").with_max_channels(10);

        let union = ChannelSet::union([&a, &b]);
        assert_eq!(union.ids(), vec![3, 1, 5, 0]);
        assert_eq!(union.max_channels(), 10);
    }

    #[test]
    fn channel_display() {
        assert_eq!(Channel::new(12).to_string(), "channel 12");
    }
}
