//! Channel-hopping strategies.
//!
//! Every strategy is a small state machine: construction fixes its
//! parameters (prime modulus, random rate, permutation, role), and each call
//! to [`Rendezvous::next_channel`] advances one slot and yields a channel.

mod crseq;
mod exhaustive;
mod jump_stay;
mod modular_clock;
mod random;
mod sequence;

use std::{fmt, str::FromStr};

pub use crseq::{CrSeqStrategy, crseq_index};
pub use exhaustive::{ExhaustiveSearch, OrderingPolicy, Role};
pub use jump_stay::{JumpStayStrategy, jump_stay_channel, jump_stay_round};
pub use modular_clock::ModularClockStrategy;
pub use random::RandomStrategy;
pub use sequence::{SequenceStrategy, preset_sequence};

use crate::{
    channel::{Channel, ChannelSet},
    env::Environment,
    error::RendezvousError,
};

/// Per-slot channel decision maker owned by one node.
pub trait Rendezvous {
    /// Human readable strategy name.
    fn name(&self) -> &'static str;

    /// Advance one slot and return the channel to tune to.
    fn next_channel(&mut self) -> Channel;

    /// Channels this strategy may select from.
    ///
    /// Every decision is a member of this set. For most strategies it is the
    /// node's own set; the exhaustive-search master sweeps the whole
    /// scenario population.
    fn channels(&self) -> &ChannelSet;
}

/// What a strategy needs to know about its node when built by name.
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext<'a> {
    /// Node id; node 1 takes the master role in exhaustive search.
    pub node_id: u32,
    /// Channels available to this node.
    pub channels: &'a ChannelSet,
    /// Union of every node's channels in the scenario.
    pub population: &'a ChannelSet,
}

/// Rendezvous algorithms selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Uniform random channel every slot.
    Random,
    /// Random-rate walk modulo a prime.
    ModularClock,
    /// Synthesized permutation sequence.
    Sequence,
    /// Literature presets for 3..=5 channels, synthesized otherwise.
    SequencePreset,
    /// Jump-stay hopping.
    JumpStay,
    /// CRSeq triangular-number sequence.
    CrSeq,
    /// Master/slave exhaustive search with the given ordering.
    Exhaustive(OrderingPolicy),
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Self; 12] = [
        Self::Random,
        Self::ModularClock,
        Self::Sequence,
        Self::SequencePreset,
        Self::JumpStay,
        Self::CrSeq,
        Self::Exhaustive(OrderingPolicy::Randomized),
        Self::Exhaustive(OrderingPolicy::LowestIdFirst),
        Self::Exhaustive(OrderingPolicy::HighestIdFirst),
        Self::Exhaustive(OrderingPolicy::SmallestGapFirst),
        Self::Exhaustive(OrderingPolicy::LargestGapFirst),
        Self::Exhaustive(OrderingPolicy::EvenOddFirst),
    ];

    /// Canonical command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::ModularClock => "modularclock",
            Self::Sequence => "sequence",
            Self::SequencePreset => "sequence-preset",
            Self::JumpStay => "jumpstay",
            Self::CrSeq => "crseq",
            Self::Exhaustive(OrderingPolicy::Randomized) => "ex",
            Self::Exhaustive(OrderingPolicy::LowestIdFirst) => "ex-lowest",
            Self::Exhaustive(OrderingPolicy::HighestIdFirst) => "ex-highest",
            Self::Exhaustive(OrderingPolicy::SmallestGapFirst) => "ex-smallest-gap",
            Self::Exhaustive(OrderingPolicy::LargestGapFirst) => "ex-largest-gap",
            Self::Exhaustive(OrderingPolicy::EvenOddFirst) => "ex-even-odd",
        }
    }

    /// Build the strategy for one node.
    ///
    /// `env` becomes the strategy's private random source.
    ///
    /// # Errors
    ///
    /// Returns `NoChannels` for an empty channel set, or
    /// `ChannelNotInPopulation` if the exhaustive-search master owns a
    /// channel the population lacks.
    pub fn build<E>(
        self,
        ctx: &StrategyContext<'_>,
        mut env: E,
    ) -> Result<Box<dyn Rendezvous>, RendezvousError>
    where
        E: Environment + 'static,
    {
        let channels = ctx.channels.clone();
        let strategy: Box<dyn Rendezvous> = match self {
            Self::Random => Box::new(RandomStrategy::new(channels, env)?),
            Self::ModularClock => Box::new(ModularClockStrategy::new(channels, env)?),
            Self::Sequence => Box::new(SequenceStrategy::new(channels, &mut env, false)?),
            Self::SequencePreset => Box::new(SequenceStrategy::new(channels, &mut env, true)?),
            Self::JumpStay => Box::new(JumpStayStrategy::new(channels, &mut env)?),
            Self::CrSeq => Box::new(CrSeqStrategy::new(channels)?),
            Self::Exhaustive(policy) => Box::new(ExhaustiveSearch::new(
                policy,
                Role::for_node(ctx.node_id),
                ctx.channels,
                ctx.population,
                &mut env,
            )?),
        };
        Ok(strategy)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = RendezvousError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let algorithm = match name.as_str() {
            "random" => Self::Random,
            "modularclock" | "mc" => Self::ModularClock,
            "sequence" | "seq" => Self::Sequence,
            "sequence-preset" => Self::SequencePreset,
            "jumpstay" | "js" => Self::JumpStay,
            "crseq" => Self::CrSeq,
            "ex" | "ex-random" => Self::Exhaustive(OrderingPolicy::Randomized),
            "ex-lowest" => Self::Exhaustive(OrderingPolicy::LowestIdFirst),
            "ex-highest" => Self::Exhaustive(OrderingPolicy::HighestIdFirst),
            "ex-smallest-gap" => Self::Exhaustive(OrderingPolicy::SmallestGapFirst),
            "ex-largest-gap" => Self::Exhaustive(OrderingPolicy::LargestGapFirst),
            "ex-even-odd" => Self::Exhaustive(OrderingPolicy::EvenOddFirst),
            _ => return Err(RendezvousError::UnknownAlgorithm { name: s.trim().to_string() }),
        };
        Ok(algorithm)
    }
}

/// Non-empty channel set with infallible index resolution.
#[derive(Debug, Clone)]
pub(crate) struct LocalChannels {
    set: ChannelSet,
    first: Channel,
}

impl LocalChannels {
    pub(crate) fn new(set: ChannelSet) -> Result<Self, RendezvousError> {
        let first = set.get(0).ok_or(RendezvousError::NoChannels)?;
        Ok(Self { set, first })
    }

    pub(crate) fn len(&self) -> usize {
        self.set.len()
    }

    pub(crate) fn count(&self) -> u64 {
        self.set.len() as u64
    }

    /// Resolve an index, wrapping anything past the end.
    pub(crate) fn at(&self, index: usize) -> Channel {
        self.set.wrapped(index).unwrap_or(self.first)
    }

    pub(crate) fn at_u64(&self, index: u64) -> Channel {
        let folded = index % self.count();
        self.at(usize::try_from(folded).unwrap_or_default())
    }

    pub(crate) fn set(&self) -> &ChannelSet {
        &self.set
    }
}
