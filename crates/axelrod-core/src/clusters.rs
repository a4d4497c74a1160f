//! Cluster Analysis
//!
//! Distinct cultures, cluster sizes, and the categorical node coloring
//! derived from them.
//!
//! Distinct cultures are always enumerated in lexicographic order, so a
//! culture's position (its color) is the same across every call made on an
//! unchanged network.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::CultureError;
use crate::network::{CultureState, CulturalNetwork};

/// A distinct culture and the number of nodes holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub culture: Vec<u32>,
    pub size: usize,
}

fn culture_counts(state: &CultureState) -> BTreeMap<&[u32], usize> {
    let mut counts = BTreeMap::new();
    for culture in &state.cultures {
        *counts.entry(culture.as_slice()).or_insert(0) += 1;
    }
    counts
}

impl<N, E> CulturalNetwork<N, E> {
    /// The distinct culture vectors present and how many there are.
    pub fn network_cultures(&self) -> Result<(Vec<Vec<u32>>, usize), CultureError> {
        let state = self.require_culture("network_cultures")?;
        let distinct: BTreeSet<&[u32]> = state.cultures.iter().map(Vec::as_slice).collect();
        let count = distinct.len();
        Ok((distinct.into_iter().map(<[u32]>::to_vec).collect(), count))
    }

    /// Node count per distinct culture, aligned with
    /// [`network_cultures`](Self::network_cultures), and the largest of them.
    ///
    /// The maximum is 0 for a network without nodes.
    pub fn cultural_sizes_and_max(&self) -> Result<(Vec<usize>, usize), CultureError> {
        let state = self.require_culture("cultural_sizes_and_max")?;
        let sizes: Vec<usize> = culture_counts(state).into_values().collect();
        let max = sizes.iter().copied().max().unwrap_or(0);
        Ok((sizes, max))
    }

    pub fn clusters(&self) -> Result<Vec<Cluster>, CultureError> {
        let state = self.require_culture("clusters")?;
        Ok(culture_counts(state)
            .into_iter()
            .map(|(culture, size)| Cluster {
                culture: culture.to_vec(),
                size,
            })
            .collect())
    }

    /// Colors every node with the position of its culture among the
    /// distinct cultures, and returns the colors in node order.
    pub fn color_nodes(&mut self) -> Result<Vec<usize>, CultureError> {
        let colors = self.current_colors("color_nodes")?;
        self.colors = colors.iter().copied().map(Some).collect();
        Ok(colors)
    }

    /// Colors the nodes would get, without storing them.
    pub(crate) fn current_colors(&self, operation: &'static str) -> Result<Vec<usize>, CultureError> {
        let state = self.require_culture(operation)?;
        let palette: BTreeMap<&[u32], usize> = culture_counts(state)
            .into_keys()
            .enumerate()
            .map(|(color, culture)| (culture, color))
            .collect();

        Ok(state
            .cultures
            .iter()
            .map(|culture| palette[culture.as_slice()])
            .collect())
    }
}
