//! Snapshot Types
//!
//! Serialization structs for network snapshots.
//!
//! A snapshot captures every node's culture and the cluster structure at one
//! step of a run, for analysis and downstream visualization.

use serde::{Deserialize, Serialize};

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// A single node's cultural state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub node: usize,
    pub culture: Vec<u32>,
    #[serde(default)]
    pub color: Option<usize>,
    #[serde(default)]
    pub degree: usize,
}

/// One distinct culture and the number of nodes holding it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    /// Position of this culture in the enumeration, also the node color
    pub color: usize,
    pub culture: Vec<u32>,
    pub size: usize,
}

/// Aggregate cluster measurements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetrics {
    pub distinct_cultures: usize,
    pub largest_cluster: usize,
    /// Largest cluster divided by node count (0 for an empty network)
    pub largest_cluster_fraction: f64,
    pub fixed_point: bool,
}

/// Complete network state at one step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub snapshot_id: String,
    pub step: u64,
    pub triggered_by: String,
    pub number_of_features: usize,
    pub number_of_traits: u32,
    pub nodes: Vec<NodeSnapshot>,
    pub clusters: Vec<ClusterSnapshot>,
    #[serde(default)]
    pub metrics: ClusterMetrics,
}

impl NetworkSnapshot {
    pub fn new(
        snapshot_id: impl Into<String>,
        step: u64,
        triggered_by: impl Into<String>,
        number_of_features: usize,
        number_of_traits: u32,
    ) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            step,
            triggered_by: triggered_by.into(),
            number_of_features,
            number_of_traits,
            nodes: Vec::new(),
            clusters: Vec::new(),
            metrics: ClusterMetrics::default(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Sum of all cluster sizes; equals the node count for a consistent snapshot.
    pub fn clustered_node_count(&self) -> usize {
        self.clusters.iter().map(|c| c.size).sum()
    }

    /// Cluster with the given color, if any.
    pub fn cluster(&self, color: usize) -> Option<&ClusterSnapshot> {
        self.clusters.iter().find(|c| c.color == color)
    }
}
