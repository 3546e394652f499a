//! CRSeq: triangular-number rendezvous sequence.
//!
//! The period of `P·(3P−1)` slots is split into `P` subsequences of `3P−1`
//! slots. Subsequence `j` starts its first `2P−1` slots at the triangular
//! number `j(j+1)/2` modulo `P` and stays on channel `j` for the last `P`
//! slots. The triangular offsets between subsequences make any two copies of
//! the sequence, shifted by any number of slots, coincide within one period.

use tracing::{debug, trace};

use super::{LocalChannels, Rendezvous};
use crate::{
    channel::{Channel, ChannelSet},
    error::RendezvousError,
    prime,
};

/// Channel index (0-based) at slot `t` for `m` channels and prime `p`.
///
/// # Panics
///
/// Panics if `m` or `p` is zero.
pub fn crseq_index(m: u64, p: u64, t: u64) -> u64 {
    let sub_len = 3 * p - 1;
    let slot = t % (p * sub_len);
    let sub_slot = slot % sub_len;
    let j = slot / sub_len;

    if sub_slot < 2 * p - 1 {
        let triangular = j * (j + 1) / 2;
        ((triangular + sub_slot) % p) % m
    } else {
        j % m
    }
}

/// CRSeq hopping over a node's channel set.
///
/// Fully deterministic: the phase between two nodes comes only from when
/// they started.
pub struct CrSeqStrategy {
    channels: LocalChannels,
    m: u64,
    p: u64,
    slot: u64,
}

impl CrSeqStrategy {
    /// Create a CRSeq strategy over `channels`.
    ///
    /// # Errors
    ///
    /// Returns `NoChannels` if `channels` is empty.
    pub fn new(channels: ChannelSet) -> Result<Self, RendezvousError> {
        let channels = LocalChannels::new(channels)?;
        let m = channels.count();
        let p = prime::next_prime_after(m);

        debug!(m, p, period = p * (3 * p - 1), "crseq initialized");

        Ok(Self { channels, m, p, slot: 0 })
    }

    /// Prime modulus `P`.
    pub fn prime(&self) -> u64 {
        self.p
    }

    /// Length of one full sequence period.
    pub fn period(&self) -> u64 {
        self.p * (3 * self.p - 1)
    }
}

impl Rendezvous for CrSeqStrategy {
    fn name(&self) -> &'static str {
        "CRSeq"
    }

    fn next_channel(&mut self) -> Channel {
        let index = crseq_index(self.m, self.p, self.slot);
        trace!(slot = self.slot, index, "crseq step");
        self.slot += 1;
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

    #[test]
    fn twenty_channels_start_on_channel_zero() {
        let set = ChannelSet::from_ids(0..20).expect("unique ids");
        let mut strategy = CrSeqStrategy::new(set).expect("build");
        assert_eq!(strategy.prime(), 23);
        assert_eq!(strategy.period(), 23 * 68);
        assert_eq!(strategy.next_channel(), Channel::new(0));
    }

    #[test]
    fn prime_strictly_above_prime_channel_count() {
        let set = ChannelSet::from_ids(0..5).expect("unique ids");
        let strategy = CrSeqStrategy::new(set).expect("build");
        assert_eq!(strategy.prime(), 7);
        assert_eq!(strategy.period(), 7 * 20);
    }

    #[test]
    #[should_panic(expected = "divisor of zero")]
    fn zero_channel_count_is_rejected() {
        crseq_index(0, 2, 0);
    }

    #[test]
    fn first_subsequence_layout() {
        // M=4, P=5: jump part is 0..=8 mod 5, stay part is channel 0.
        let first: Vec<u64> = (0..14).map(|t| crseq_index(4, 5, t)).collect();
        assert_eq!(first, vec![0, 1, 2, 3, 0, 0, 1, 2, 3, 0, 0, 0, 0, 0]);

        // Subsequence 1 starts at triangular number 1.
        assert_eq!(crseq_index(4, 5, 14), 1);
        assert_eq!(crseq_index(4, 5, 14 + 9), 1);
    }

    #[test]
    fn shifted_copies_always_coincide() {
        for m in 1..=8u64 {
            let p = prime::next_prime_after(m);
            let period = p * (3 * p - 1);
            for shift in 0..period {
                let hit = (0..period).any(|t| crseq_index(m, p, t) == crseq_index(m, p, t + shift));
                assert!(hit, "no coincidence for m={m} shift={shift}");
            }
        }
    }

    proptest! {
        #[test]
        fn prop_index_in_range(m in 1u64..60, t in any::<u32>()) {
            let p = prime::next_prime_after(m);
            prop_assert!(crseq_index(m, p, u64::from(t)) < m);
        }
    }
}
