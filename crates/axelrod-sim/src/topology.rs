//! Fixture Topologies
//!
//! The handful of regular graphs the driver can run on. Random graph
//! generators are left to callers who build their own petgraph graphs.

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::config::TopologyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    /// 2D grid with von Neumann neighborhoods (the classic Axelrod setting)
    #[default]
    Lattice,
    /// Cycle where each node touches the next one
    Ring,
    /// Every pair of nodes connected
    Complete,
}

impl TopologyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopologyKind::Lattice => "lattice",
            TopologyKind::Ring => "ring",
            TopologyKind::Complete => "complete",
        }
    }
}

/// Builds the graph described by `config`.
pub fn build_graph(config: &TopologyConfig) -> UnGraph<(), ()> {
    match config.kind {
        TopologyKind::Lattice => build_lattice(config.width, config.height),
        TopologyKind::Ring => build_ring(config.nodes),
        TopologyKind::Complete => build_complete(config.nodes),
    }
}

/// Grid of `width * height` nodes; node `row * width + col`.
pub fn build_lattice(width: usize, height: usize) -> UnGraph<(), ()> {
    let mut graph = UnGraph::new_undirected();
    let nodes: Vec<NodeIndex> = (0..width * height).map(|_| graph.add_node(())).collect();

    for row in 0..height {
        for col in 0..width {
            let node = row * width + col;
            if col + 1 < width {
                graph.add_edge(nodes[node], nodes[node + 1], ());
            }
            if row + 1 < height {
                graph.add_edge(nodes[node], nodes[node + width], ());
            }
        }
    }

    graph
}

pub fn build_ring(n: usize) -> UnGraph<(), ()> {
    let mut graph = UnGraph::new_undirected();
    let nodes: Vec<NodeIndex> = (0..n).map(|_| graph.add_node(())).collect();

    // Below three nodes the wrap-around edge would duplicate or self-loop
    let edges = if n < 3 { n.saturating_sub(1) } else { n };
    for i in 0..edges {
        graph.add_edge(nodes[i], nodes[(i + 1) % n], ());
    }

    graph
}

pub fn build_complete(n: usize) -> UnGraph<(), ()> {
    let mut graph = UnGraph::new_undirected();
    let nodes: Vec<NodeIndex> = (0..n).map(|_| graph.add_node(())).collect();

    for i in 0..n {
        for j in (i + 1)..n {
            graph.add_edge(nodes[i], nodes[j], ());
        }
    }

    graph
}
