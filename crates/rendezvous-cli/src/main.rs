//! Blind rendezvous simulator.
//!
//! # Usage
//!
//! ```bash
//! # Two nodes, every channel shared
//! rendezvous-sim -a jumpstay,crseq -c 40 -i 1000
//!
//! # Asymmetric availability with 5 common channels, appended to a table
//! rendezvous-sim -a ex-lowest -m async -c 40 -g 5 -t 0.5 -i 1000 --header -f ttr.tsv
//! ```

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use rendezvous_core::Algorithm;
use rendezvous_harness::{
    AlgorithmReport, ChannelModel, Experiment, ExperimentConfig, MAX_SLOTS, ScenarioConfig,
    report::HEADER,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Blind rendezvous simulator
#[derive(Parser, Debug)]
#[command(name = "rendezvous-sim")]
#[command(about = "Time-to-rendezvous experiments for channel hopping algorithms")]
#[command(version)]
struct Args {
    /// Algorithms to compare, comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "random")]
    algorithm: Vec<Algorithm>,

    /// Number of channels in the pool (M)
    #[arg(short, long, default_value_t = 5)]
    channels: u32,

    /// Channel availability model (sync, async)
    #[arg(short, long, default_value = "sync")]
    model: ChannelModel,

    /// Channels shared by every node (G); forced to M for sync
    #[arg(short = 'g', long, default_value_t = 5)]
    overlap: u32,

    /// Fraction of the pool each node sees in the async model
    #[arg(short, long, default_value_t = 0.5)]
    theta: f64,

    /// Number of nodes
    #[arg(short, long, default_value_t = 2)]
    nodes: u32,

    /// Scenarios to draw
    #[arg(short, long, default_value_t = 1)]
    iterations: u32,

    /// Root seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Slot limit per trial
    #[arg(long, default_value_t = MAX_SLOTS)]
    max_slots: u64,

    /// Print the column header before the rows
    #[arg(long)]
    header: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Append the table to this file instead of stdout
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl Args {
    fn experiment_config(&self) -> ExperimentConfig {
        ExperimentConfig {
            scenario: ScenarioConfig {
                model: self.model,
                num_channels: self.channels,
                overlap: self.overlap,
                theta: self.theta,
                num_nodes: self.nodes,
            },
            algorithms: self.algorithm.clone(),
            iterations: self.iterations,
            seed: self.seed,
            max_slots: self.max_slots,
        }
    }

    fn log_filter(&self) -> EnvFilter {
        let level = if self.quiet { "warn" } else { self.log_level.as_str() };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

fn write_table<W: Write>(
    out: &mut W,
    reports: &[AlgorithmReport],
    header: bool,
) -> io::Result<()> {
    if header {
        writeln!(out, "{HEADER}")?;
    }
    for report in reports {
        writeln!(out, "{report}")?;
    }
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(args.log_filter())
        .init();

    let experiment = Experiment::new(args.experiment_config())?;
    let config = experiment.config();
    tracing::info!(
        model = %config.scenario.model,
        channels = config.scenario.num_channels,
        overlap = config.scenario.overlap,
        nodes = config.scenario.num_nodes,
        iterations = config.iterations,
        seed = config.seed,
        "experiment starting"
    );

    let reports = experiment.run()?;

    match &args.file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            write_table(&mut BufWriter::new(file), &reports, args.header)?;
            tracing::info!(path = %path.display(), "table written");
        },
        None => write_table(&mut io::stdout().lock(), &reports, args.header)?,
    }

    Ok(())
}
