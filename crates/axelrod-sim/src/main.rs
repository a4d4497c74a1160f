//! Axelrod Culture Simulation
//!
//! Runs the cultural dissemination model on a fixture topology and reports
//! how many cultural regions survive.

use axelrod_sim::{Config, Runner, DEFAULT_CONFIG_PATH};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "axelrod_sim")]
#[command(about = "Axelrod model of cultural dissemination")]
struct Args {
    /// Configuration file (defaults apply if it is missing)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Step budget
    #[arg(long)]
    steps: Option<u64>,

    /// Number of cultural features per node
    #[arg(long)]
    features: Option<usize>,

    /// Number of traits each feature can take
    #[arg(long)]
    traits: Option<u32>,

    /// Directory for stats, snapshots and events
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write one JSON line per step
    #[arg(long)]
    log_events: bool,

    /// Trace every cultural copy
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(steps) = self.steps {
            config.simulation.max_steps = steps;
        }
        if let Some(features) = self.features {
            config.culture.features = features;
        }
        if let Some(traits) = self.traits {
            config.culture.traits = traits;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.log_events {
            config.output.log_events = true;
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "axelrod_sim=info,axelrod_core=debug"
    } else {
        "axelrod_sim=info,axelrod_core=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = Config::load_or_default(&args.config);
    args.apply(&mut config);

    println!("Axelrod Culture Simulation");
    println!("==========================");
    println!("Seed: {}", config.simulation.seed);
    println!("Steps: {}", config.simulation.max_steps);
    println!(
        "Culture: {} features x {} traits",
        config.culture.features, config.culture.traits
    );
    println!("Topology: {}", config.topology.kind.as_str());
    println!();

    let summary = match Runner::new(config).and_then(|mut runner| runner.run()) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("run failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("Run {} complete.", summary.run_id);
    println!(
        "  {} steps, {}",
        summary.steps,
        if summary.converged {
            "reached a fixed point"
        } else {
            "budget exhausted before a fixed point"
        }
    );
    println!(
        "  {} cultural copies, {} rejected interactions",
        summary.copies, summary.rejections
    );
    println!(
        "  {} distinct cultures, largest region {} nodes",
        summary.distinct_cultures, summary.largest_cluster
    );
    println!("  {} snapshots, stats at {}", summary.snapshots_written, summary.stats_path.display());

    ExitCode::SUCCESS
}
