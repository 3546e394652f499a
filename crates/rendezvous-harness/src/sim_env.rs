//! Seeded simulation environment.
//!
//! `SimEnv` is the only [`Environment`] used by the harness. A run starts
//! from one seed; scenarios, start offsets and every node's strategy draw
//! from forks of it, so no two consumers share generator state and the whole
//! run replays bit for bit.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rendezvous_core::Environment;

/// ChaCha8-backed deterministic environment.
#[derive(Debug, Clone)]
pub struct SimEnv {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SimEnv {
    /// Create an environment from a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), seed }
    }

    /// Seed this environment was created from.
    ///
    /// `Experiment::run` logs the root seed so a run can be replayed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Environment for SimEnv {
    type Rng = ChaCha8Rng;

    fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    fn fork(&mut self) -> Self {
        let seed = self.rng.next_u64();
        Self::with_seed(seed)
    }
}
