//! Uniform random baseline.

use tracing::trace;

use super::{LocalChannels, Rendezvous};
use crate::{
    channel::{Channel, ChannelSet},
    env::Environment,
    error::RendezvousError,
};

/// Picks a uniformly random channel every slot.
///
/// Memoryless and without any rendezvous guarantee; the baseline the other
/// strategies are measured against.
pub struct RandomStrategy<E> {
    channels: LocalChannels,
    env: E,
}

impl<E: Environment> RandomStrategy<E> {
    /// Create a random strategy over `channels`.
    ///
    /// # Errors
    ///
    /// Returns `NoChannels` if `channels` is empty.
    pub fn new(channels: ChannelSet, env: E) -> Result<Self, RendezvousError> {
        Ok(Self { channels: LocalChannels::new(channels)?, env })
    }
}

impl<E: Environment> Rendezvous for RandomStrategy<E> {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn next_channel(&mut self) -> Channel {
        let index = self.env.random_index(self.channels.len());
        trace!(index, "random draw");
        self.channels.at(index)
    }

    fn channels(&self) -> &ChannelSet {
        self.channels.set()
    }
}
