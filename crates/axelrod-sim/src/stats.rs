//! Statistics Output
//!
//! Collects run statistics: how steps resolved and how the cluster
//! structure evolved.

use axelrod_core::{StepObserver, StepOutcome};
use axelrod_events::InteractionKind;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Statistics file name inside the output directory
pub const STATS_FILE: &str = "stats.json";

/// Cluster structure at one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSample {
    pub step: u64,
    pub distinct_cultures: usize,
    pub largest_cluster: usize,
    pub active_edges: usize,
}

/// Overall run statistics
#[derive(Debug, Clone, Serialize)]
pub struct SimulationStats {
    pub run_id: String,
    pub seed: u64,
    pub total_steps: u64,
    pub converged: bool,
    pub outcomes_by_kind: BTreeMap<String, u64>,
    /// Fraction of steps that changed a culture
    pub copy_rate: f64,
    pub final_distinct_cultures: usize,
    pub final_largest_cluster: usize,
    pub history: Vec<ClusterSample>,
}

/// Accumulates statistics during a run
#[derive(Debug, Default)]
pub struct StatsCollector {
    outcomes_by_kind: HashMap<InteractionKind, u64>,
    observed_steps: u64,
    history: Vec<ClusterSample>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how one step resolved
    pub fn record_outcome(&mut self, outcome: &StepOutcome) {
        self.observed_steps += 1;
        *self.outcomes_by_kind.entry(outcome.kind()).or_insert(0) += 1;
    }

    pub fn count(&self, kind: InteractionKind) -> u64 {
        self.outcomes_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn observed_steps(&self) -> u64 {
        self.observed_steps
    }

    /// Record the cluster structure at a step
    pub fn record_sample(&mut self, sample: ClusterSample) {
        self.history.push(sample);
    }

    pub fn history(&self) -> &[ClusterSample] {
        &self.history
    }

    pub fn latest_sample(&self) -> Option<&ClusterSample> {
        self.history.last()
    }

    /// Generate final statistics
    pub fn generate_stats(&self, run_id: &str, seed: u64, converged: bool) -> SimulationStats {
        let copy_rate = if self.observed_steps > 0 {
            self.count(InteractionKind::Copied) as f64 / self.observed_steps as f64
        } else {
            0.0
        };

        let outcomes_by_kind = InteractionKind::all()
            .iter()
            .map(|kind| (kind.as_str().to_string(), self.count(*kind)))
            .collect();

        let latest = self.latest_sample();

        SimulationStats {
            run_id: run_id.to_string(),
            seed,
            total_steps: self.observed_steps,
            converged,
            outcomes_by_kind,
            copy_rate,
            final_distinct_cultures: latest.map(|s| s.distinct_cultures).unwrap_or(0),
            final_largest_cluster: latest.map(|s| s.largest_cluster).unwrap_or(0),
            history: self.history.clone(),
        }
    }
}

impl StepObserver for StatsCollector {
    fn observe(&mut self, outcome: &StepOutcome) {
        self.record_outcome(outcome);
    }
}

/// Write statistics into `output_dir`, returning the file path
pub fn write_stats(output_dir: &Path, stats: &SimulationStats) -> io::Result<PathBuf> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }

    let json = serde_json::to_string_pretty(stats)?;
    let path = output_dir.join(STATS_FILE);
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axelrod_core::NodeIndex;

    fn sample(step: u64, distinct: usize, largest: usize) -> ClusterSample {
        ClusterSample {
            step,
            distinct_cultures: distinct,
            largest_cluster: largest,
            active_edges: 0,
        }
    }

    #[test]
    fn test_stats_collector_new() {
        let collector = StatsCollector::new();
        assert_eq!(collector.observed_steps(), 0);
        assert!(collector.history().is_empty());

        let stats = collector.generate_stats("run", 1, false);
        assert_eq!(stats.copy_rate, 0.0);
        assert_eq!(stats.final_distinct_cultures, 0);
        assert_eq!(stats.outcomes_by_kind.len(), InteractionKind::all().len());
    }

    #[test]
    fn test_outcome_counts() {
        let mut collector = StatsCollector::new();
        let copy = StepOutcome::Copied {
            agent: NodeIndex::new(0),
            partner: NodeIndex::new(1),
            feature: 0,
            value: 1,
        };
        let rejected = StepOutcome::Rejected {
            agent: NodeIndex::new(0),
            partner: NodeIndex::new(1),
        };

        collector.observe(&copy);
        collector.observe(&rejected);
        collector.observe(&rejected);
        collector.observe(&StepOutcome::Idle);

        assert_eq!(collector.count(InteractionKind::Copied), 1);
        assert_eq!(collector.count(InteractionKind::Rejected), 2);
        assert_eq!(collector.count(InteractionKind::Aligned), 0);

        let stats = collector.generate_stats("run", 7, false);
        assert_eq!(stats.total_steps, 4);
        assert_eq!(stats.copy_rate, 0.25);
        assert_eq!(stats.outcomes_by_kind["rejected"], 2);
    }

    #[test]
    fn test_final_values_come_from_latest_sample() {
        let mut collector = StatsCollector::new();
        collector.record_sample(sample(0, 90, 2));
        collector.record_sample(sample(1000, 12, 40));

        let stats = collector.generate_stats("run", 7, true);
        assert!(stats.converged);
        assert_eq!(stats.final_distinct_cultures, 12);
        assert_eq!(stats.final_largest_cluster, 40);
        assert_eq!(stats.history.len(), 2);
    }

    #[test]
    fn test_write_stats() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let stats = StatsCollector::new().generate_stats("abc", 3, false);

        let path = write_stats(&out, &stats).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["run_id"], "abc");
        assert_eq!(written["seed"], 3);
    }
}
