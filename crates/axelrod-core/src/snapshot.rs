//! Snapshot Generation
//!
//! Builds serializable network snapshots for the driver and for analysis.

use axelrod_events::{ClusterMetrics, ClusterSnapshot, NetworkSnapshot, NodeSnapshot};

use crate::error::CultureError;
use crate::network::CulturalNetwork;
use crate::step::distinct_neighbors;

impl<N, E> CulturalNetwork<N, E> {
    /// Captures every node's culture and the cluster structure.
    ///
    /// Node colors are computed fresh from the current cultures; stored
    /// colors are left untouched.
    pub fn snapshot(
        &self,
        snapshot_id: impl Into<String>,
        step: u64,
        triggered_by: &str,
    ) -> Result<NetworkSnapshot, CultureError> {
        let state = self.require_culture("snapshot")?;
        let colors = self.current_colors("snapshot")?;
        let clusters = self.clusters()?;

        let mut snapshot = NetworkSnapshot::new(
            snapshot_id,
            step,
            triggered_by,
            state.number_of_features,
            state.number_of_traits,
        );

        snapshot.nodes = self
            .graph
            .node_indices()
            .zip(colors)
            .map(|(node, color)| NodeSnapshot {
                node: node.index(),
                culture: state.culture(node).to_vec(),
                color: Some(color),
                degree: distinct_neighbors(&self.graph, node).len(),
            })
            .collect();

        let largest_cluster = clusters.iter().map(|c| c.size).max().unwrap_or(0);
        let node_count = self.graph.node_count();
        snapshot.metrics = ClusterMetrics {
            distinct_cultures: clusters.len(),
            largest_cluster,
            largest_cluster_fraction: if node_count > 0 {
                largest_cluster as f64 / node_count as f64
            } else {
                0.0
            },
            fixed_point: self.fixed_point()?,
        };

        snapshot.clusters = clusters
            .into_iter()
            .enumerate()
            .map(|(color, cluster)| ClusterSnapshot {
                color,
                culture: cluster.culture,
                size: cluster.size,
            })
            .collect();

        Ok(snapshot)
    }
}
