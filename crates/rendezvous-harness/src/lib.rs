//! Deterministic simulation harness for blind rendezvous experiments.
//!
//! Builds random channel-availability scenarios, runs one strategy per node
//! slot by slot until every node picks the same channel, and tallies
//! time-to-rendezvous (TTR) statistics per algorithm.
//!
//! # Determinism
//!
//! Every source of randomness, from the scenario layout to the strategies'
//! private rates and permutations, is forked from a single seeded
//! [`SimEnv`]. The same seed and configuration reproduce an experiment
//! exactly.
//!
//! # Flow
//!
//! ```text
//! Experiment ──▶ Scenario::build ──▶ nodes ──▶ run_trial ──▶ TtrMonitor
//!     │                                                          │
//!     └──────────────────── AlgorithmReport ◀────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod experiment;
pub mod node;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod sim_env;
pub mod stats;

pub use error::SimulationError;
pub use experiment::{Experiment, ExperimentConfig};
pub use node::Node;
pub use report::{AlgorithmReport, TtrSummary};
pub use runner::{AsyncStart, MAX_SLOTS, TrialOutcome, run_trial};
pub use scenario::{ChannelModel, Scenario, ScenarioConfig};
pub use sim_env::SimEnv;
pub use stats::TtrMonitor;
