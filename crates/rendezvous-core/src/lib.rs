//! Rendezvous Core
//!
//! Channel-hopping sequence engine for blind rendezvous in cognitive radio
//! networks. Every strategy turns a node's local view of the spectrum into a
//! channel decision per time slot, without any coordination between nodes.
//!
//! # Architecture
//!
//! The engine is a set of pure state machines:
//! - The caller constructs one strategy per node, handing it the node's
//!   [`ChannelSet`] and a run-scoped [`Environment`] for randomness
//! - Once per slot the caller asks for [`Rendezvous::next_channel`]
//! - The caller compares decisions across nodes to detect rendezvous
//!
//! No strategy performs I/O or touches process-wide state, so runs are
//! reproducible given the same environment seed.
//!
//! # Components
//!
//! - [`prime`]: prime moduli for the number-theoretic sequences
//! - [`RandomStrategy`], [`ModularClockStrategy`], [`SequenceStrategy`],
//!   [`JumpStayStrategy`], [`CrSeqStrategy`]: per-node hopping sequences
//! - [`ExhaustiveSearch`]: master/slave search with pluggable
//!   [`OrderingPolicy`]
//! - [`Algorithm`]: name-based factory used by drivers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod channel;
pub mod env;
mod error;
pub mod prime;
pub mod strategy;

pub use channel::{Channel, ChannelSet};
pub use env::Environment;
pub use error::RendezvousError;
pub use strategy::{
    Algorithm, CrSeqStrategy, ExhaustiveSearch, JumpStayStrategy, ModularClockStrategy,
    OrderingPolicy, RandomStrategy, Rendezvous, Role, SequenceStrategy, StrategyContext,
};
