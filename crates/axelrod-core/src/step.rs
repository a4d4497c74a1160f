//! Interaction Step
//!
//! One unit of cultural exchange: a random agent meets a random neighbor and,
//! with probability equal to their similarity, the neighbor adopts one trait
//! on which they disagree.

use axelrod_events::{InteractionEvent, InteractionKind};
use petgraph::graph::{NodeIndex, UnGraph};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{not_initialized, CultureError};
use crate::network::{matching_features, CulturalNetwork};
use crate::observer::StepObserver;

/// How the step treats an agent without neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IsolatedPolicy {
    /// Draw the agent only from nodes that have neighbors
    #[default]
    Resample,
    /// Draw from all nodes; an isolated agent makes the step a no-op
    Skip,
    /// Draw from all nodes; an isolated agent is an error
    Fail,
}

impl IsolatedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IsolatedPolicy::Resample => "resample",
            IsolatedPolicy::Skip => "skip",
            IsolatedPolicy::Fail => "fail",
        }
    }
}

impl std::str::FromStr for IsolatedPolicy {
    type Err = CultureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resample" => Ok(IsolatedPolicy::Resample),
            "skip" => Ok(IsolatedPolicy::Skip),
            "fail" => Ok(IsolatedPolicy::Fail),
            other => Err(CultureError::InvalidArgument(format!(
                "unknown isolated policy '{}'",
                other
            ))),
        }
    }
}

/// Result of a single interaction step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// `partner` overwrote `feature` with the agent's `value`
    Copied {
        agent: NodeIndex,
        partner: NodeIndex,
        feature: usize,
        value: u32,
    },
    /// The pair disagreed but the similarity draw failed
    Rejected { agent: NodeIndex, partner: NodeIndex },
    /// The pair already agreed on every feature
    Aligned { agent: NodeIndex, partner: NodeIndex },
    /// The agent had no neighbors
    Isolated { agent: NodeIndex },
    /// No node could act as agent
    Idle,
}

impl StepOutcome {
    pub fn kind(&self) -> InteractionKind {
        match self {
            StepOutcome::Copied { .. } => InteractionKind::Copied,
            StepOutcome::Rejected { .. } => InteractionKind::Rejected,
            StepOutcome::Aligned { .. } => InteractionKind::Aligned,
            StepOutcome::Isolated { .. } => InteractionKind::Isolated,
            StepOutcome::Idle => InteractionKind::Idle,
        }
    }

    pub fn agent(&self) -> Option<NodeIndex> {
        match *self {
            StepOutcome::Copied { agent, .. }
            | StepOutcome::Rejected { agent, .. }
            | StepOutcome::Aligned { agent, .. }
            | StepOutcome::Isolated { agent } => Some(agent),
            StepOutcome::Idle => None,
        }
    }

    pub fn partner(&self) -> Option<NodeIndex> {
        match *self {
            StepOutcome::Copied { partner, .. }
            | StepOutcome::Rejected { partner, .. }
            | StepOutcome::Aligned { partner, .. } => Some(partner),
            StepOutcome::Isolated { .. } | StepOutcome::Idle => None,
        }
    }

    /// True if the step changed a culture.
    pub fn changed(&self) -> bool {
        matches!(self, StepOutcome::Copied { .. })
    }

    /// Converts the outcome to a loggable event.
    pub fn to_event(&self, event_id: impl Into<String>, step: u64) -> InteractionEvent {
        let mut event = InteractionEvent::new(event_id, step, self.kind());
        if let Some(agent) = self.agent() {
            event = event.with_agent(agent.index());
        }
        if let Some(partner) = self.partner() {
            event = event.with_partner(partner.index());
        }
        if let StepOutcome::Copied { feature, value, .. } = *self {
            event = event.with_change(feature, value);
        }
        event
    }
}

impl<N, E> CulturalNetwork<N, E> {
    /// Performs one interaction step and reports its outcome to `observer`.
    ///
    /// Random draws happen in a fixed order: agent, partner, then (only when
    /// the pair disagrees somewhere) the similarity trial and the feature.
    pub fn interact<R: Rng, O: StepObserver>(
        &mut self,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<StepOutcome, CultureError> {
        let outcome = self.exchange(rng)?;
        observer.observe(&outcome);
        Ok(outcome)
    }

    /// Performs one interaction step. Returns the network for chaining.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<&mut Self, CultureError> {
        self.interact(rng, &mut ())?;
        Ok(self)
    }

    fn exchange<R: Rng>(&mut self, rng: &mut R) -> Result<StepOutcome, CultureError> {
        let Self {
            graph,
            state,
            isolated_policy,
            connected,
            ..
        } = self;
        let state = state.as_mut().ok_or_else(|| not_initialized("step"))?;

        let agent = match isolated_policy {
            IsolatedPolicy::Resample => connected.choose(rng).copied(),
            IsolatedPolicy::Skip | IsolatedPolicy::Fail => {
                let count = graph.node_count();
                (count > 0).then(|| NodeIndex::new(rng.gen_range(0..count)))
            }
        };
        let Some(agent) = agent else {
            return Ok(StepOutcome::Idle);
        };

        let neighbors = distinct_neighbors(graph, agent);
        let Some(&partner) = neighbors.choose(rng) else {
            return match isolated_policy {
                IsolatedPolicy::Fail => Err(CultureError::NoNeighbors(agent.index())),
                _ => Ok(StepOutcome::Isolated { agent }),
            };
        };

        let agent_culture = state.culture(agent);
        let partner_culture = state.culture(partner);
        let disagreements: Vec<usize> = agent_culture
            .iter()
            .zip(partner_culture)
            .enumerate()
            .filter(|(_, (a, p))| a != p)
            .map(|(i, _)| i)
            .collect();

        if disagreements.is_empty() {
            return Ok(StepOutcome::Aligned { agent, partner });
        }

        let similarity = matching_features(agent_culture, partner_culture) as f64
            / state.number_of_features as f64;
        if !rng.gen_bool(similarity) {
            return Ok(StepOutcome::Rejected { agent, partner });
        }

        let feature = disagreements[rng.gen_range(0..disagreements.len())];
        let value = agent_culture[feature];
        state.cultures[partner.index()][feature] = value;

        Ok(StepOutcome::Copied {
            agent,
            partner,
            feature,
            value,
        })
    }
}

/// Neighbors of `node` without duplicates from parallel edges, in index order.
pub(crate) fn distinct_neighbors<N, E>(graph: &UnGraph<N, E>, node: NodeIndex) -> Vec<NodeIndex> {
    let mut neighbors: Vec<NodeIndex> = graph.neighbors(node).collect();
    neighbors.sort_unstable();
    neighbors.dedup();
    neighbors
}
