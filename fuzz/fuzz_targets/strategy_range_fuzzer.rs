//! Fuzz target for strategy construction and slot decisions
//!
//! # Strategy
//!
//! - Channel sets: arbitrary ids, duplicates dropped, possibly empty
//! - Populations: the node's own set merged with arbitrary extra ids
//! - Roles: arbitrary node ids, so exhaustive search runs as master or slave
//!
//! # Invariants
//!
//! - Construction either succeeds or returns a configuration error
//! - Every decision lies inside the strategy's visible channel set
//! - NEVER panic, whatever the ids or set sizes

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rendezvous_core::{Algorithm, ChannelSet, StrategyContext};
use rendezvous_harness::SimEnv;

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    seed: u64,
    algorithm: u8,
    node_id: u32,
    own: Vec<u32>,
    extra: Vec<u32>,
    slots: u16,
}

fn channel_set(ids: impl IntoIterator<Item = u32>) -> ChannelSet {
    let mut set = ChannelSet::new();
    for id in ids {
        // Duplicates are rejected; skipping them keeps the rest.
        let _ = set.insert(id.into());
    }
    set
}

fuzz_target!(|input: FuzzInput| {
    let algorithm = Algorithm::ALL[usize::from(input.algorithm) % Algorithm::ALL.len()];
    let own = channel_set(input.own.iter().copied().take(64));
    let extra = channel_set(input.extra.iter().copied().take(64));
    let population = ChannelSet::union([&own, &extra]);

    let ctx = StrategyContext { node_id: input.node_id, channels: &own, population: &population };
    let Ok(mut strategy) = algorithm.build(&ctx, SimEnv::with_seed(input.seed)) else {
        assert!(own.is_empty(), "{algorithm} rejected a non-empty channel set");
        return;
    };

    for _ in 0..input.slots.min(4096) {
        let channel = strategy.next_channel();
        assert!(
            strategy.channels().contains(channel),
            "{} picked {channel} outside its set",
            strategy.name()
        );
    }
});
