//! Jump-stay channel hopping.
//!
//! Time is divided into rounds of `3P` slots. For the first `2P` slots of a
//! round the node *jumps* along an arithmetic progression modulo `P`; for the
//! last `P` slots it *stays* on its rate channel. The rate advances every
//! round and the starting offset every `M` rounds, so any two independently
//! phased nodes overlap within a bounded number of rounds.
//!
//! All arithmetic here is 1-based to match the published construction; the
//! strategy converts to a 0-based index only when resolving a channel.

use tracing::{debug, trace};

use super::{LocalChannels, Rendezvous};
use crate::{
    channel::{Channel, ChannelSet},
    env::Environment,
    error::RendezvousError,
    prime,
};

/// Channel (1-based) for round-relative slot `s` with rate `r` and offset `i`.
///
/// Values above `m` are remapped into `[1, m]`.
///
/// # Panics
///
/// Panics if `m` or `p` is zero.
pub fn jump_stay_channel(m: u64, p: u64, r: u64, i: u64, s: u64) -> u64 {
    let s = s % (3 * p);
    let j = if s < 2 * p { ((i + s * r - 1) % p) + 1 } else { r };
    if j > m { ((j - 1) % m) + 1 } else { j }
}

/// One complete `3P`-slot round (1-based channels).
///
/// # Panics
///
/// Panics if `m` or `p` is zero.
pub fn jump_stay_round(m: u64, p: u64, r: u64, i: u64) -> Vec<u64> {
    (0..3 * p).map(|s| jump_stay_channel(m, p, r, i, s)).collect()
}

/// Jump-stay hopping over a node's channel set.
pub struct JumpStayStrategy {
    channels: LocalChannels,
    /// Channel count `M`.
    m: u64,
    /// Smallest prime above `M`.
    p: u64,
    /// Hopping rate in `[1, M]`.
    rate: u64,
    /// Hopping offset in `[1, P]`.
    offset: u64,
    /// Global slot counter.
    slot: u64,
}

impl JumpStayStrategy {
    /// Create a jump-stay strategy with random rate and offset.
    ///
    /// # Errors
    ///
    /// Returns `NoChannels` if `channels` is empty.
    pub fn new<E: Environment>(channels: ChannelSet, env: &mut E) -> Result<Self, RendezvousError> {
        let channels = LocalChannels::new(channels)?;
        let m = channels.count();
        let p = prime::next_prime_after(m);
        let rate = env.random_below(m) + 1;
        let offset = env.random_below(p) + 1;

        debug!(m, p, rate, offset, "jump-stay initialized");

        Ok(Self { channels, m, p, rate, offset, slot: 0 })
    }

    /// Create a jump-stay strategy from explicit initial parameters.
    ///
    /// `rate` and `offset` describe the state before the first slot, so both
    /// advance once on the first call. Out-of-range values are wrapped into
    /// `[1, M]` and `[1, P]`.
    ///
    /// # Errors
    ///
    /// Returns `NoChannels` if `channels` is empty.
    pub fn with_parameters(
        channels: ChannelSet,
        rate: u64,
        offset: u64,
    ) -> Result<Self, RendezvousError> {
        let channels = LocalChannels::new(channels)?;
        let m = channels.count();
        let p = prime::next_prime_after(m);
        let rate = ((rate % m + m - 1) % m) + 1;
        let offset = ((offset % p + p - 1) % p) + 1;

        Ok(Self { channels, m, p, rate, offset, slot: 0 })
    }

    /// Prime modulus `P`.
    pub fn prime(&self) -> u64 {
        self.p
    }

    /// Current hopping rate.
    pub fn rate(&self) -> u64 {
        self.rate
    }

    /// Current hopping offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl Rendezvous for JumpStayStrategy {
    fn name(&self) -> &'static str {
        "JumpStay"
    }

    fn next_channel(&mut self) -> Channel {
        let round_len = 3 * self.p;

        if self.slot % round_len == 0 {
            self.rate = self.rate % self.m + 1;
        }
        if self.slot % (round_len * self.m) == 0 {
            self.offset = self.offset % self.p + 1;
        }

        let j = jump_stay_channel(self.m, self.p, self.rate, self.offset, self.slot);
        trace!(slot = self.slot, rate = self.rate, offset = self.offset, j, "jump-stay step");

        self.slot += 1;
        self.channels.at_u64(j - 1)
    }

    fn channels(&self) -> &ChannelSet {
        self.channels.set()
    }
}
