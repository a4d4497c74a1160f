//! Driver for Axelrod culture runs
//!
//! Builds a fixture topology, runs the interaction step until the network
//! freezes or the budget runs out, and writes statistics, snapshots and an
//! optional event log.

pub mod config;
pub mod logger;
pub mod runner;
pub mod stats;
pub mod topology;

pub use config::{Config, ConfigError, DEFAULT_CONFIG_PATH};
pub use logger::EventLogger;
pub use runner::{RunError, RunSummary, Runner, EVENTS_FILE, SNAPSHOT_DIR};
pub use stats::{ClusterSample, SimulationStats, StatsCollector, STATS_FILE};
pub use topology::TopologyKind;
