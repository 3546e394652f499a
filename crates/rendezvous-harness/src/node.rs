//! Simulated node.

use rendezvous_core::{
    Algorithm, Channel, ChannelSet, Environment, Rendezvous, RendezvousError, StrategyContext,
};
use tracing::trace;

use crate::error::SimulationError;

/// A node with its channel set and currently assigned strategy.
///
/// The strategy is replaced every time the node is initialized for another
/// algorithm; the channel set stays fixed for the scenario's lifetime.
pub struct Node {
    id: u32,
    channels: ChannelSet,
    strategy: Option<Box<dyn Rendezvous>>,
}

impl Node {
    /// Create an uninitialized node.
    pub fn new(id: u32, channels: ChannelSet) -> Self {
        Self { id, channels, strategy: None }
    }

    /// Node id; node 1 is the exhaustive-search master.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Channels available to this node.
    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    /// Name of the active strategy, if any.
    pub fn strategy_name(&self) -> Option<&'static str> {
        self.strategy.as_ref().map(|s| s.name())
    }

    /// Assign a fresh strategy for `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns the engine's configuration error if the strategy cannot be
    /// built for this node.
    pub fn initialize<E>(
        &mut self,
        algorithm: Algorithm,
        population: &ChannelSet,
        env: E,
    ) -> Result<(), RendezvousError>
    where
        E: Environment + 'static,
    {
        let ctx = StrategyContext { node_id: self.id, channels: &self.channels, population };
        self.strategy = Some(algorithm.build(&ctx, env)?);
        Ok(())
    }

    /// Channel for the next slot.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` without a strategy, or a `RangeViolation` if
    /// the strategy picked a channel outside the set it may choose from.
    pub fn next_channel(&mut self) -> Result<Channel, SimulationError> {
        let strategy =
            self.strategy.as_mut().ok_or(SimulationError::NotInitialized { node_id: self.id })?;

        let channel = strategy.next_channel();
        if !strategy.channels().contains(channel) {
            return Err(RendezvousError::RangeViolation { algorithm: strategy.name(), channel }.into());
        }

        trace!(node = self.id, %channel, "slot decision");
        Ok(channel)
    }
}
