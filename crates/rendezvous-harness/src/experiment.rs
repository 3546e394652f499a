//! Repeated trials over fresh scenarios.

use rendezvous_core::{Algorithm, Environment};
use tracing::{debug, info};

use crate::{
    error::SimulationError,
    report::{AlgorithmReport, TtrSummary},
    runner::{AsyncStart, MAX_SLOTS, TrialOutcome, run_trial},
    scenario::{Scenario, ScenarioConfig},
    sim_env::SimEnv,
    stats::TtrMonitor,
};

/// What to run and how often.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Channel layout parameters.
    pub scenario: ScenarioConfig,
    /// Algorithms compared on every scenario.
    pub algorithms: Vec<Algorithm>,
    /// Scenarios drawn.
    pub iterations: u32,
    /// Root seed.
    pub seed: u64,
    /// Slot limit per trial.
    pub max_slots: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            scenario: ScenarioConfig::default(),
            algorithms: vec![Algorithm::Random],
            iterations: 1,
            seed: 42,
            max_slots: MAX_SLOTS,
        }
    }
}

/// A validated experiment.
///
/// Each iteration draws one scenario and one asynchronous start, then runs
/// every algorithm on that same layout so results are paired across
/// algorithms.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
}

impl Experiment {
    /// Normalize and validate `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unusable scenario.
    pub fn new(mut config: ExperimentConfig) -> Result<Self, SimulationError> {
        config.scenario = config.scenario.normalized();
        config.scenario.validate()?;
        Ok(Self { config })
    }

    /// Effective configuration after normalization.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run all iterations and report per algorithm, in configured order.
    ///
    /// # Errors
    ///
    /// Fails on the first strategy that cannot be built for a node or that
    /// picks a channel outside its set.
    pub fn run(&self) -> Result<Vec<AlgorithmReport>, SimulationError> {
        let config = &self.config;
        let mut root = SimEnv::with_seed(config.seed);
        info!(seed = root.seed(), iterations = config.iterations, "experiment seeded");
        let mut monitors = vec![TtrMonitor::new(); config.algorithms.len()];
        let mut failures = vec![0usize; config.algorithms.len()];

        for iteration in 0..config.iterations {
            let mut env = root.fork();
            let scenario = Scenario::build(&config.scenario, &mut env)?;
            let start = AsyncStart::draw(&config.scenario, scenario.num_nodes(), &mut env);
            debug!(iteration, ?start, "scenario ready");

            for (index, &algorithm) in config.algorithms.iter().enumerate() {
                let mut nodes = scenario.spawn_nodes();
                for node in &mut nodes {
                    node.initialize(algorithm, scenario.population(), env.fork())?;
                }

                match run_trial(&mut nodes, start, config.max_slots)? {
                    TrialOutcome::Rendezvous { ttr, .. } => monitors[index].tally(ttr),
                    TrialOutcome::Exhausted { .. } => failures[index] += 1,
                }
            }
        }

        let reports: Vec<AlgorithmReport> = config
            .algorithms
            .iter()
            .zip(monitors.iter().zip(failures))
            .map(|(&algorithm, (monitor, failed))| AlgorithmReport {
                algorithm,
                num_channels: config.scenario.num_channels,
                overlap: config.scenario.overlap,
                iterations: config.iterations,
                succeeded: monitor.len(),
                failed,
                ttr: TtrSummary::from_monitor(monitor),
            })
            .collect();

        for report in &reports {
            info!(
                algorithm = %report.algorithm,
                succeeded = report.succeeded,
                failed = report.failed,
                mean_ttr = report.ttr.map(|t| t.mean),
                "algorithm finished"
            );
        }

        Ok(reports)
    }
}
