//! Fixed-Point Detection
//!
//! An edge is active while its endpoints share some but not all features:
//! only then can a step still change anything. A network without active
//! edges is absorbing.

use petgraph::visit::EdgeRef;

use crate::error::CultureError;
use crate::network::{matching_features, CultureState, CulturalNetwork};

fn is_active(state: &CultureState, common: usize) -> bool {
    common != 0 && common != state.number_of_features
}

impl<N, E> CulturalNetwork<N, E> {
    /// True iff every pair of neighbors agrees on all features or on none.
    ///
    /// Isolated nodes never prevent a fixed point.
    pub fn fixed_point(&self) -> Result<bool, CultureError> {
        let state = self.require_culture("fixed_point")?;
        Ok(!self.graph.edge_references().any(|edge| {
            let common =
                matching_features(state.culture(edge.source()), state.culture(edge.target()));
            is_active(state, common)
        }))
    }

    /// Number of edges whose endpoints can still interact.
    pub fn active_edges(&self) -> Result<usize, CultureError> {
        let state = self.require_culture("active_edges")?;
        Ok(self
            .graph
            .edge_references()
            .filter(|edge| {
                let common =
                    matching_features(state.culture(edge.source()), state.culture(edge.target()));
                is_active(state, common)
            })
            .count())
    }
}
