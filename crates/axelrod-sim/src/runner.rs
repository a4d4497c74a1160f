//! Simulation Runner
//!
//! Drives a network through interaction steps until it reaches a fixed point
//! or the step budget runs out, sampling cluster statistics and writing
//! snapshots along the way.

use axelrod_core::{CulturalNetwork, CultureError, TraceObserver};
use axelrod_events::{generate_snapshot_id, InteractionKind};
use petgraph::graph::UnGraph;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{Config, ConfigError};
use crate::logger::EventLogger;
use crate::stats::{write_stats, ClusterSample, StatsCollector};
use crate::topology::build_graph;

/// Event log file name inside the output directory
pub const EVENTS_FILE: &str = "events.jsonl";
/// Snapshot directory inside the output directory
pub const SNAPSHOT_DIR: &str = "snapshots";

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Culture(#[from] CultureError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a finished run reports
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub seed: u64,
    pub steps: u64,
    pub converged: bool,
    pub copies: u64,
    pub rejections: u64,
    pub distinct_cultures: usize,
    pub largest_cluster: usize,
    pub active_edges: usize,
    pub snapshots_written: u64,
    pub stats_path: PathBuf,
}

pub struct Runner {
    config: Config,
    run_id: Uuid,
    network: CulturalNetwork,
    rng: SmallRng,
    logger: Option<EventLogger>,
    stats: StatsCollector,
    steps: u64,
    snapshots_written: u64,
}

impl Runner {
    /// Builds the configured topology and assigns random cultures.
    pub fn new(config: Config) -> Result<Self, RunError> {
        config.validate_topology()?;
        let graph = build_graph(&config.topology);
        Self::with_graph(config, graph)
    }

    /// Runs on a caller-supplied graph; the `[topology]` section is ignored.
    pub fn with_graph(config: Config, graph: UnGraph<(), ()>) -> Result<Self, RunError> {
        config.validate_run()?;

        let mut rng = SmallRng::seed_from_u64(config.simulation.seed);
        let mut network = CulturalNetwork::new(graph)
            .with_isolated_policy(config.simulation.isolated_policy);
        network.create_cultural_network(config.culture.features, config.culture.traits, &mut rng)?;

        let logger = if config.output.log_events {
            fs::create_dir_all(&config.output.dir)?;
            Some(EventLogger::new(config.output.dir.join(EVENTS_FILE))?)
        } else {
            None
        };

        Ok(Self {
            config,
            run_id: Uuid::new_v4(),
            network,
            rng,
            logger,
            stats: StatsCollector::new(),
            steps: 0,
            snapshots_written: 0,
        })
    }

    pub fn network(&self) -> &CulturalNetwork {
        &self.network
    }

    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Runs to a fixed point or the step budget, whichever comes first.
    pub fn run(&mut self) -> Result<RunSummary, RunError> {
        let simulation = self.config.simulation.clone();
        tracing::info!(
            run_id = %self.run_id,
            nodes = self.network.node_count(),
            edges = self.network.graph().edge_count(),
            features = self.config.culture.features,
            traits = self.config.culture.traits,
            max_steps = simulation.max_steps,
            "starting run"
        );
        for (node, culture) in self.network.list_cultures()? {
            tracing::debug!(node = node.index(), ?culture, "initial culture");
        }

        self.sample("run_start")?;
        let mut converged = self.network.fixed_point()?;

        while !converged && self.steps < simulation.max_steps {
            self.advance()?;

            if self.steps % simulation.check_interval == 0 {
                converged = self.network.fixed_point()?;
            }
            if simulation.snapshot_interval > 0 && self.steps % simulation.snapshot_interval == 0 {
                self.sample("periodic")?;
                if let Some(sample) = self.stats.latest_sample() {
                    tracing::info!(
                        step = self.steps,
                        distinct_cultures = sample.distinct_cultures,
                        largest_cluster = sample.largest_cluster,
                        active_edges = sample.active_edges,
                        "progress"
                    );
                }
            }
        }

        if !converged {
            converged = self.network.fixed_point()?;
        }
        if self.stats.latest_sample().map(|s| s.step) != Some(self.steps) {
            self.sample("run_end")?;
        }
        self.network.color_nodes()?;

        if let Some(logger) = self.logger.as_mut() {
            logger.flush()?;
        }

        let stats = self
            .stats
            .generate_stats(&self.run_id.to_string(), simulation.seed, converged);
        let stats_path = write_stats(&self.config.output.dir, &stats)?;

        let (sizes, largest_cluster) = self.network.cultural_sizes_and_max()?;
        let summary = RunSummary {
            run_id: self.run_id.to_string(),
            seed: simulation.seed,
            steps: self.steps,
            converged,
            copies: self.stats.count(InteractionKind::Copied),
            rejections: self.stats.count(InteractionKind::Rejected),
            distinct_cultures: sizes.len(),
            largest_cluster,
            active_edges: self.network.active_edges()?,
            snapshots_written: self.snapshots_written,
            stats_path,
        };

        tracing::info!(
            steps = summary.steps,
            converged = summary.converged,
            distinct_cultures = summary.distinct_cultures,
            largest_cluster = summary.largest_cluster,
            "run complete"
        );
        Ok(summary)
    }

    /// Performs one interaction step with every observer attached.
    fn advance(&mut self) -> Result<(), RunError> {
        self.steps += 1;
        if let Some(logger) = self.logger.as_mut() {
            logger.set_step(self.steps);
        }

        let mut observers = (&mut self.stats, (&mut self.logger, TraceObserver));
        self.network.interact(&mut self.rng, &mut observers)?;

        if let Some(e) = self.logger.as_mut().and_then(EventLogger::take_error) {
            return Err(e.into());
        }
        Ok(())
    }

    /// Records the cluster structure and, if enabled, writes a snapshot.
    fn sample(&mut self, triggered_by: &str) -> Result<(), RunError> {
        let (sizes, largest_cluster) = self.network.cultural_sizes_and_max()?;
        self.stats.record_sample(ClusterSample {
            step: self.steps,
            distinct_cultures: sizes.len(),
            largest_cluster,
            active_edges: self.network.active_edges()?,
        });

        if self.config.output.write_snapshots {
            self.write_snapshot(triggered_by)?;
        }
        Ok(())
    }

    fn write_snapshot(&mut self, triggered_by: &str) -> Result<PathBuf, RunError> {
        let snapshot = self.network.snapshot(
            generate_snapshot_id(self.snapshots_written + 1),
            self.steps,
            triggered_by,
        )?;

        let dir = self.config.output.dir.join(SNAPSHOT_DIR);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.json", snapshot.snapshot_id));
        fs::write(&path, serde_json::to_string_pretty(&snapshot)?)?;

        self.snapshots_written += 1;
        tracing::debug!(path = %path.display(), triggered_by, "wrote snapshot");
        Ok(path)
    }
}
