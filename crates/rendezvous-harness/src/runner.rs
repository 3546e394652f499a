//! Slot-by-slot rendezvous trials.
//!
//! A trial asks every node for a channel once per slot, starting at slot 1,
//! until all nodes agree. The slot at which they agree is the
//! time-to-rendezvous. A trial that reaches the slot limit without agreement
//! is exhausted: it counts as a failure and never contributes a TTR.

use rendezvous_core::{Channel, Environment};
use tracing::{debug, trace};

use crate::{error::SimulationError, node::Node, scenario::ScenarioConfig};

/// Default slot limit per trial.
pub const MAX_SLOTS: u64 = 39_999;

/// Result of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialOutcome {
    /// All nodes picked `channel` in slot `ttr`.
    Rendezvous {
        /// Time to rendezvous in slots (1-based).
        ttr: u64,
        /// Channel the nodes met on.
        channel: Channel,
    },
    /// No agreement within the slot limit.
    Exhausted {
        /// Slots simulated before giving up.
        slots: u64,
    },
}

impl TrialOutcome {
    /// Time to rendezvous, if the trial succeeded.
    pub fn ttr(&self) -> Option<u64> {
        match self {
            Self::Rendezvous { ttr, .. } => Some(*ttr),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Asynchronous start: one node runs ahead before slot 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AsyncStart {
    /// Index of the node that starts early.
    pub node_index: usize,
    /// Slots it consumes before the others start.
    pub slots: u64,
}

impl AsyncStart {
    /// Draw a random head start for one of `num_nodes` nodes.
    ///
    /// The head start is uniform in `[1, max(⌊M·θ⌋ − 1, 2))`.
    pub fn draw<E: Environment>(config: &ScenarioConfig, num_nodes: usize, env: &mut E) -> Self {
        let upper = head_start_bound(config.average_channels());
        let slots = 1 + env.random_below(upper - 1);
        let node_index = env.random_index(num_nodes);
        Self { node_index, slots }
    }
}

/// Exclusive upper bound on the head start.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn head_start_bound(average_channels: f64) -> u64 {
    // Saturating float conversion; NaN becomes 0.
    let floor = average_channels.floor().max(0.0) as u64;
    floor.saturating_sub(1).max(2)
}

/// Run nodes until they agree or `max_slots` slots have passed.
///
/// Nodes must already be initialized with a strategy.
///
/// # Errors
///
/// Returns `NotInitialized` or `RangeViolation` from the nodes.
pub fn run_trial(
    nodes: &mut [Node],
    start: AsyncStart,
    max_slots: u64,
) -> Result<TrialOutcome, SimulationError> {
    if let Some(node) = nodes.get_mut(start.node_index) {
        for _ in 0..start.slots {
            node.next_channel()?;
        }
        trace!(node = node.id(), slots = start.slots, "asynchronous start");
    }

    let mut decisions = Vec::with_capacity(nodes.len());
    for slot in 1..=max_slots {
        decisions.clear();
        for node in nodes.iter_mut() {
            decisions.push(node.next_channel()?);
        }

        if let Some(&channel) = decisions.first() {
            if decisions.iter().all(|&c| c == channel) {
                debug!(slot, %channel, "rendezvous");
                return Ok(TrialOutcome::Rendezvous { ttr: slot, channel });
            }
        }
    }

    debug!(max_slots, "no rendezvous within slot limit");
    Ok(TrialOutcome::Exhausted { slots: max_slots })
}
