//! Permutation-derived sequence rendezvous.
//!
//! The sequence for `N` channels is built from a random permutation `π`:
//! for each position `i`, emit `π[i]` followed by the whole of `π`. The
//! result has `N·(N+1)` slots and is walked circularly from a random offset.
//! For 3, 4 and 5 channels the published reference sequences can be used
//! instead, which keeps results comparable with the literature.

use tracing::{debug, trace};

use super::{LocalChannels, Rendezvous};
use crate::{
    channel::{Channel, ChannelSet},
    env::Environment,
    error::RendezvousError,
};

const PRESET_3: [usize; 12] = [0, 0, 1, 2, 1, 1, 0, 2, 2, 2, 0, 1];

const PRESET_4: [usize; 24] =
    [0, 0, 0, 1, 2, 3, 1, 1, 1, 0, 2, 3, 2, 2, 2, 0, 1, 3, 3, 3, 3, 0, 1, 2];

const PRESET_5: [usize; 30] = [
    1, 2, 4, 3, 0, 0, 1, 4, 3, 2, 3, 4, 2, 1, 0, 3, 1, 4, 2, 0, 2, 3, 4, 0, 1, 2, 3, 1, 4, 0,
];

/// Reference sequence for `count` channels, if one is published.
pub fn preset_sequence(count: usize) -> Option<&'static [usize]> {
    match count {
        3 => Some(&PRESET_3[..]),
        4 => Some(&PRESET_4[..]),
        5 => Some(&PRESET_5[..]),
        _ => None,
    }
}

/// Walks a precomputed index sequence circularly.
pub struct SequenceStrategy {
    channels: LocalChannels,
    sequence: Vec<usize>,
    index: usize,
}

impl SequenceStrategy {
    /// Create a sequence strategy over `channels`.
    ///
    /// With `use_presets` the published sequence is used when one exists for
    /// this channel count; otherwise a sequence is synthesized from a random
    /// permutation drawn from `env`.
    ///
    /// # Errors
    ///
    /// Returns `NoChannels` if `channels` is empty.
    pub fn new<E: Environment>(
        channels: ChannelSet,
        env: &mut E,
        use_presets: bool,
    ) -> Result<Self, RendezvousError> {
        let channels = LocalChannels::new(channels)?;
        let count = channels.len();

        let sequence = match preset_sequence(count).filter(|_| use_presets) {
            Some(preset) => {
                debug!(count, "using preset sequence");
                preset.to_vec()
            },
            None => Self::synthesize(count, env),
        };
        let index = env.random_index(count);

        debug!(len = sequence.len(), start = index, "sequence initialized");

        Ok(Self { channels, sequence, index })
    }

    /// Build an `N·(N+1)` sequence from a random permutation of `[0, count)`.
    pub fn synthesize<E: Environment>(count: usize, env: &mut E) -> Vec<usize> {
        let permutation = random_permutation(count, env);

        let mut sequence = Vec::with_capacity(count * (count + 1));
        for &head in &permutation {
            sequence.push(head);
            sequence.extend_from_slice(&permutation);
        }
        sequence
    }

    /// Full sequence of channel indices.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Index into the sequence that the next slot will use.
    pub fn position(&self) -> usize {
        self.index
    }
}

/// Uniform permutation of `[0, count)` by rejection sampling.
fn random_permutation<E: Environment>(count: usize, env: &mut E) -> Vec<usize> {
    let mut permutation = Vec::with_capacity(count);
    let mut used = vec![false; count];

    while permutation.len() < count {
        let candidate = env.random_index(count);
        if !used[candidate] {
            used[candidate] = true;
            permutation.push(candidate);
        }
    }
    permutation
}

impl Rendezvous for SequenceStrategy {
    fn name(&self) -> &'static str {
        "Sequence"
    }

    fn next_channel(&mut self) -> Channel {
        let value = self.sequence[self.index];
        self.index = (self.index + 1) % self.sequence.len();
        trace!(value, "sequence step");
        self.channels.at(value)
    }

    fn channels(&self) -> &ChannelSet {
        self.channels.set()
    }
}
