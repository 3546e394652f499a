//! Channel-availability scenarios.
//!
//! A scenario hands every node its own [`ChannelSet`] drawn from a pool of
//! `M` channels:
//!
//! - Symmetric: every node sees all `M` channels
//! - Asymmetric: every node sees `G` common channels plus
//!   `⌈M·θ − G⌉` channels of its own, drawn without replacement from what is
//!   left of the pool
//!
//! Channels are appended in draw order, so nodes generally know the same
//! channel under different indices.

use std::{fmt, str::FromStr};

use rendezvous_core::{Channel, ChannelSet, Environment};
use tracing::{debug, warn};

use crate::{error::SimulationError, node::Node};

/// How channels are distributed over nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelModel {
    /// All nodes share the full pool.
    #[default]
    Symmetric,
    /// Nodes share `G` channels and hold the rest individually.
    Asymmetric,
}

impl fmt::Display for ChannelModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symmetric => f.write_str("symmetric"),
            Self::Asymmetric => f.write_str("asymmetric"),
        }
    }
}

impl FromStr for ChannelModel {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sync" | "symmetric" => Ok(Self::Symmetric),
            "async" | "asymmetric" => Ok(Self::Asymmetric),
            _ => Err(SimulationError::UnknownModel { name: s.trim().to_string() }),
        }
    }
}

/// Scenario parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    /// Channel distribution model.
    pub model: ChannelModel,
    /// Pool size `M`.
    pub num_channels: u32,
    /// Channels common to all nodes, `G`.
    pub overlap: u32,
    /// Fraction of the pool each node should end up with.
    pub theta: f64,
    /// Number of nodes taking part.
    pub num_nodes: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            model: ChannelModel::Symmetric,
            num_channels: 5,
            overlap: 5,
            theta: 0.5,
            num_nodes: 2,
        }
    }
}

impl ScenarioConfig {
    /// Resolve dependent parameters.
    ///
    /// The symmetric model shares the whole pool, so `G = M`; in every model
    /// `G` is capped at `M`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.model == ChannelModel::Symmetric {
            self.overlap = self.num_channels;
        }
        self.overlap = self.overlap.min(self.num_channels);
        self
    }

    /// Check the parameters describe a buildable scenario.
    ///
    /// # Errors
    ///
    /// Returns `NoChannels`, `NoNodes` or `InvalidTheta`.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.num_channels == 0 {
            return Err(SimulationError::NoChannels);
        }
        if self.num_nodes == 0 {
            return Err(SimulationError::NoNodes);
        }
        if !self.theta.is_finite() || self.theta < 0.0 {
            return Err(SimulationError::InvalidTheta { theta: self.theta });
        }
        Ok(())
    }

    /// Individual channels each node receives in the asymmetric model.
    pub fn individual_channels(&self) -> u32 {
        match self.model {
            ChannelModel::Symmetric => 0,
            ChannelModel::Asymmetric => {
                ceil_to_count(self.average_channels() - f64::from(self.overlap))
            },
        }
    }

    /// Expected channel count per node, `M·θ`.
    pub fn average_channels(&self) -> f64 {
        f64::from(self.num_channels) * self.theta
    }
}

/// Round up to a channel count; negative and NaN inputs become 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_to_count(value: f64) -> u32 {
    // Float-to-int `as` saturates at the bounds of u32.
    value.ceil().max(0.0) as u32
}

/// A concrete channel layout for every node.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Channel sets in node order; node ids start at 1.
    node_channels: Vec<ChannelSet>,
    /// Union of all node channel sets.
    population: ChannelSet,
}

impl Scenario {
    /// Draw a scenario from `env`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn build<E: Environment>(
        config: &ScenarioConfig,
        env: &mut E,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let pool_size = usize::try_from(config.num_channels).unwrap_or(usize::MAX);

        let mut pool: Vec<Channel> = (0..config.num_channels).map(Channel::new).collect();
        let mut node_channels: Vec<ChannelSet> = (0..config.num_nodes)
            .map(|_| ChannelSet::new().with_max_channels(pool_size))
            .collect();

        for _ in 0..config.overlap {
            let Some(channel) = draw(&mut pool, env) else { break };
            debug!(%channel, "common channel");
            for channels in &mut node_channels {
                channels.insert(channel)?;
            }
        }

        let individual = config.individual_channels();
        for (index, channels) in node_channels.iter_mut().enumerate() {
            for drawn in 0..individual {
                let Some(channel) = draw(&mut pool, env) else {
                    warn!(
                        node = index + 1,
                        wanted = individual,
                        got = drawn,
                        "channel pool too small to satisfy M*theta"
                    );
                    break;
                };
                debug!(%channel, node = index + 1, "individual channel");
                channels.insert(channel)?;
            }
        }

        let population = ChannelSet::union(&node_channels).with_max_channels(pool_size);
        Ok(Self { node_channels, population })
    }

    /// Assemble a scenario from explicit per-node channel sets.
    pub fn from_channel_sets(node_channels: Vec<ChannelSet>) -> Self {
        let population = ChannelSet::union(&node_channels);
        Self { node_channels, population }
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.node_channels.len()
    }

    /// Channel set of the node with the given id.
    pub fn channels(&self, node_id: u32) -> Option<&ChannelSet> {
        let index = usize::try_from(node_id).ok()?.checked_sub(1)?;
        self.node_channels.get(index)
    }

    /// Union of every node's channels.
    pub fn population(&self) -> &ChannelSet {
        &self.population
    }

    /// Fresh, uninitialized nodes for this layout.
    pub fn spawn_nodes(&self) -> Vec<Node> {
        (1..)
            .zip(&self.node_channels)
            .map(|(id, channels)| Node::new(id, channels.clone()))
            .collect()
    }
}

/// Remove a uniformly random channel from `pool`.
fn draw<E: Environment>(pool: &mut Vec<Channel>, env: &mut E) -> Option<Channel> {
    if pool.is_empty() {
        return None;
    }
    let index = env.random_index(pool.len());
    Some(pool.swap_remove(index))
}
