//! Modular clock rendezvous.
//!
//! Each node walks the cyclic group of order `P` (the prime above its channel
//! count) with a random step, the "rate". Two nodes with different rates
//! cover every residue against each other within `P` slots. The rate is
//! redrawn every `2P` slots so that an unlucky pair of equal rates cannot
//! persist forever.

use tracing::{debug, trace};

use super::{LocalChannels, Rendezvous};
use crate::{
    channel::{Channel, ChannelSet},
    env::Environment,
    error::RendezvousError,
    prime,
};

/// Random-rate walk modulo a prime.
pub struct ModularClockStrategy<E> {
    channels: LocalChannels,
    env: E,
    /// Group order, the smallest prime above the channel count.
    prime: u64,
    /// Current residue in `[0, prime)`.
    position: u64,
    /// Step added to `position` every slot, in `[0, prime)`.
    rate: u64,
    /// Slots taken with the current rate.
    slots_at_rate: u64,
}

impl<E: Environment> ModularClockStrategy<E> {
    /// Create a modular clock over `channels` with a random start and rate.
    ///
    /// # Errors
    ///
    /// Returns `NoChannels` if `channels` is empty.
    pub fn new(channels: ChannelSet, mut env: E) -> Result<Self, RendezvousError> {
        let channels = LocalChannels::new(channels)?;
        let prime = prime::next_prime_after(channels.count());
        let position = env.random_below(channels.count());
        let rate = env.random_below(prime);

        debug!(channels = channels.len(), prime, position, rate, "modular clock initialized");

        Ok(Self { channels, env, prime, position, rate, slots_at_rate: 0 })
    }

    /// Group order `P`.
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Current hopping rate.
    pub fn rate(&self) -> u64 {
        self.rate
    }

    /// Residue reached by the most recent slot.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn renew_rate(&mut self) {
        self.rate = self.env.random_below(self.prime);
        self.slots_at_rate = 0;
        debug!(rate = self.rate, "modular clock rate renewed");
    }
}

impl<E: Environment> Rendezvous for ModularClockStrategy<E> {
    fn name(&self) -> &'static str {
        "ModularClock"
    }

    fn next_channel(&mut self) -> Channel {
        if self.slots_at_rate >= 2 * self.prime {
            self.renew_rate();
        }
        self.slots_at_rate += 1;

        self.position = (self.position + self.rate) % self.prime;

        // Residues past the channel count fold back into range.
        let count = self.channels.count();
        let index = if self.position < count { self.position } else { self.position % count };

        trace!(position = self.position, index, "modular clock step");
        self.channels.at_u64(index)
    }

    fn channels(&self) -> &ChannelSet {
        self.channels.set()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::env::testing::TestEnv;

    fn clock(count: u32, seed: u64) -> ModularClockStrategy<TestEnv> {
        let set = ChannelSet::from_ids(0..count).expect("unique ids");
        ModularClockStrategy::new(set, TestEnv::with_seed(seed)).expect("build")
    }

    #[test]
    fn prime_exceeds_channel_count() {
        assert_eq!(clock(4, 0).prime(), 5);
        assert_eq!(clock(5, 0).prime(), 7);
        assert_eq!(clock(1, 0).prime(), 2);
    }

    #[test]
    fn renewal_window_is_arithmetic_progression() {
        for seed in 0..20 {
            let mut strategy = clock(10, seed);
            let p = strategy.prime();
            let start = strategy.position();
            let rate = strategy.rate();

            for k in 1..=2 * p {
                strategy.next_channel();
                assert_eq!(strategy.rate(), rate, "rate changed inside the window");
                assert_eq!(strategy.position(), (start + k * rate) % p);
            }
        }
    }

    #[test]
    fn rate_renewed_after_window() {
        let mut redrawn = 0;
        for seed in 0..20 {
            let mut strategy = clock(10, seed);
            let p = strategy.prime();
            for _ in 0..2 * p {
                strategy.next_channel();
            }
            let old_rate = strategy.rate();
            let end_of_window = strategy.position();

            // Slot 2P+1 steps with the new rate from where the window ended.
            strategy.next_channel();
            let rate = strategy.rate();
            assert_eq!(strategy.position(), (end_of_window + rate) % p);
            if rate != old_rate {
                redrawn += 1;
            }

            // The new rate holds for a full window again.
            for k in 2..=2 * p {
                strategy.next_channel();
                assert_eq!(strategy.rate(), rate);
                assert_eq!(strategy.position(), (end_of_window + k * rate) % p);
            }
        }
        assert!(redrawn > 0, "rate never redrawn across seeds");
    }

    #[test]
    fn no_repeat_before_full_period() {
        // Nonzero rate modulo a prime has period exactly P.
        for seed in 0..50 {
            let mut strategy = clock(12, seed);
            if strategy.rate() == 0 {
                continue;
            }
            let p = strategy.prime();
            let positions: Vec<u64> = (0..p)
                .map(|_| {
                    strategy.next_channel();
                    strategy.position()
                })
                .collect();

            let mut sorted = positions.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len() as u64, p, "residues repeated early: {positions:?}");
        }
    }

    #[test]
    fn decision_follows_wrap_rule() {
        let set = ChannelSet::from_ids([40, 41, 42, 43]).expect("unique ids");
        let mut strategy = ModularClockStrategy::new(set, TestEnv::with_seed(9)).expect("build");

        for _ in 0..200 {
            let channel = strategy.next_channel();
            let expected = 40 + (strategy.position() % 4) as u32;
            assert_eq!(channel, Channel::new(expected));
        }
    }

    proptest! {
        #[test]
        fn prop_decisions_in_range(count in 1u32..40, seed in any::<u64>()) {
            let mut strategy = clock(count, seed);
            for _ in 0..300 {
                let channel = strategy.next_channel();
                prop_assert!(channel.id() < count);
            }
        }
    }
}
