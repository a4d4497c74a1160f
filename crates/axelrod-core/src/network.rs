//! Cultural Network
//!
//! A graph whose nodes carry culture vectors. The graph itself comes from
//! petgraph and is only ever read; cultures live in a table indexed by node.

use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;

use crate::error::{not_initialized, CultureError};
use crate::step::IsolatedPolicy;

/// One node's culture: a trait value per feature, each in `[1, number_of_traits]`.
pub type Culture = Vec<u32>;

/// Culture table installed by [`CulturalNetwork::create_cultural_network`]
#[derive(Debug, Clone)]
pub(crate) struct CultureState {
    pub(crate) number_of_features: usize,
    pub(crate) number_of_traits: u32,
    /// Indexed by `NodeIndex::index()`
    pub(crate) cultures: Vec<Culture>,
}

impl CultureState {
    pub(crate) fn culture(&self, node: NodeIndex) -> &[u32] {
        &self.cultures[node.index()]
    }
}

/// An undirected graph with an Axelrod culture on every node.
///
/// The network owns its graph but never changes the topology, so node
/// indices stay valid for its whole lifetime. Every operation other than
/// [`create_cultural_network`](Self::create_cultural_network) returns
/// [`CultureError::NotInitialized`] until cultures have been assigned.
#[derive(Debug, Clone)]
pub struct CulturalNetwork<N = (), E = ()> {
    pub(crate) graph: UnGraph<N, E>,
    pub(crate) state: Option<CultureState>,
    pub(crate) colors: Vec<Option<usize>>,
    pub(crate) isolated_policy: IsolatedPolicy,
    /// Nodes with at least one neighbor, in node order
    pub(crate) connected: Vec<NodeIndex>,
}

impl<N, E> Default for CulturalNetwork<N, E> {
    fn default() -> Self {
        Self::new(UnGraph::default())
    }
}

impl<N, E> CulturalNetwork<N, E> {
    /// Wraps an existing graph. The network has no culture yet.
    pub fn new(graph: UnGraph<N, E>) -> Self {
        let connected = graph
            .node_indices()
            .filter(|&node| graph.neighbors(node).next().is_some())
            .collect();
        let colors = vec![None; graph.node_count()];

        Self {
            graph,
            state: None,
            colors,
            isolated_policy: IsolatedPolicy::default(),
            connected,
        }
    }

    /// Sets how the interaction step treats agents without neighbors.
    pub fn with_isolated_policy(mut self, policy: IsolatedPolicy) -> Self {
        self.isolated_policy = policy;
        self
    }

    pub fn isolated_policy(&self) -> IsolatedPolicy {
        self.isolated_policy
    }

    pub fn graph(&self) -> &UnGraph<N, E> {
        &self.graph
    }

    /// Gives the graph back, dropping all culture state.
    pub fn into_graph(self) -> UnGraph<N, E> {
        self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_culturized(&self) -> bool {
        self.state.is_some()
    }

    pub fn number_of_features(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.number_of_features)
    }

    pub fn number_of_traits(&self) -> Option<u32> {
        self.state.as_ref().map(|s| s.number_of_traits)
    }

    /// Assigns every node an independent random culture.
    ///
    /// Each of the `number_of_features` entries is drawn uniformly from
    /// `[1, number_of_traits]`. Calling this again re-randomizes every node
    /// and clears all colors. Returns the network for chaining.
    pub fn create_cultural_network<R: Rng>(
        &mut self,
        number_of_features: usize,
        number_of_traits: u32,
        rng: &mut R,
    ) -> Result<&mut Self, CultureError> {
        if number_of_features == 0 {
            return Err(CultureError::InvalidArgument(
                "number_of_features must be at least 1".to_string(),
            ));
        }
        if number_of_traits == 0 {
            return Err(CultureError::InvalidArgument(
                "number_of_traits must be at least 1".to_string(),
            ));
        }

        let cultures = self
            .graph
            .node_indices()
            .map(|_| {
                (0..number_of_features)
                    .map(|_| rng.gen_range(1..=number_of_traits))
                    .collect()
            })
            .collect();

        self.state = Some(CultureState {
            number_of_features,
            number_of_traits,
            cultures,
        });
        self.colors = vec![None; self.graph.node_count()];

        tracing::debug!(
            nodes = self.graph.node_count(),
            features = number_of_features,
            traits = number_of_traits,
            "assigned random cultures"
        );
        Ok(self)
    }

    /// Number of features on which two nodes hold the same trait.
    pub fn common_features(&self, a: NodeIndex, b: NodeIndex) -> Result<usize, CultureError> {
        let state = self.require_culture("common_features")?;
        self.check_node(a)?;
        self.check_node(b)?;
        Ok(matching_features(state.culture(a), state.culture(b)))
    }

    pub fn culture(&self, node: NodeIndex) -> Result<&[u32], CultureError> {
        let state = self.require_culture("culture")?;
        self.check_node(node)?;
        Ok(state.culture(node))
    }

    /// Every node with its culture, in node order.
    pub fn list_cultures(&self) -> Result<Vec<(NodeIndex, &[u32])>, CultureError> {
        let state = self.require_culture("list_cultures")?;
        Ok(self
            .graph
            .node_indices()
            .map(|node| (node, state.culture(node)))
            .collect())
    }

    /// Overwrites one node's culture.
    ///
    /// The culture must have `number_of_features` entries, each in
    /// `[1, number_of_traits]`.
    pub fn set_culture(&mut self, node: NodeIndex, culture: Culture) -> Result<(), CultureError> {
        self.check_node(node)?;
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| not_initialized("set_culture"))?;

        if culture.len() != state.number_of_features {
            return Err(CultureError::InvalidCulture {
                node: node.index(),
                reason: format!(
                    "expected {} features, got {}",
                    state.number_of_features,
                    culture.len()
                ),
            });
        }
        if let Some(&value) = culture
            .iter()
            .find(|&&v| v == 0 || v > state.number_of_traits)
        {
            return Err(CultureError::InvalidCulture {
                node: node.index(),
                reason: format!(
                    "trait {} outside [1, {}]",
                    value, state.number_of_traits
                ),
            });
        }

        state.cultures[node.index()] = culture;
        Ok(())
    }

    /// Color assigned by the last [`color_nodes`](Self::color_nodes) call.
    ///
    /// Not refreshed when cultures change afterwards.
    pub fn color(&self, node: NodeIndex) -> Option<usize> {
        self.colors.get(node.index()).copied().flatten()
    }

    pub(crate) fn require_culture(
        &self,
        operation: &'static str,
    ) -> Result<&CultureState, CultureError> {
        self.state.as_ref().ok_or_else(|| not_initialized(operation))
    }

    pub(crate) fn check_node(&self, node: NodeIndex) -> Result<(), CultureError> {
        if node.index() < self.graph.node_count() {
            Ok(())
        } else {
            Err(CultureError::UnknownNode(node.index()))
        }
    }
}

/// Count of positions where two cultures agree.
pub(crate) fn matching_features(a: &[u32], b: &[u32]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x == y).count()
}
