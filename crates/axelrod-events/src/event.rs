//! Event Types
//!
//! One event per interaction step, written as a JSON line by the driver.

use serde::{Deserialize, Serialize};

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}

/// What a single interaction step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// The partner adopted one of the agent's traits
    Copied,
    /// The pair disagreed but the similarity draw failed
    Rejected,
    /// The pair already shared every feature
    Aligned,
    /// The chosen agent had no neighbors
    Isolated,
    /// No agent could be chosen
    Idle,
}

impl InteractionKind {
    /// Returns true if a step of this kind changed a culture.
    pub fn mutates(&self) -> bool {
        matches!(self, InteractionKind::Copied)
    }

    /// Snake-case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Copied => "copied",
            InteractionKind::Rejected => "rejected",
            InteractionKind::Aligned => "aligned",
            InteractionKind::Isolated => "isolated",
            InteractionKind::Idle => "idle",
        }
    }

    /// Returns all kinds.
    pub fn all() -> &'static [InteractionKind] {
        &[
            InteractionKind::Copied,
            InteractionKind::Rejected,
            InteractionKind::Aligned,
            InteractionKind::Isolated,
            InteractionKind::Idle,
        ]
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged interaction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub event_id: String,
    pub step: u64,
    pub kind: InteractionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<usize>,
    /// Feature index that was overwritten (copies only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<usize>,
    /// Trait value the partner adopted (copies only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

impl InteractionEvent {
    pub fn new(event_id: impl Into<String>, step: u64, kind: InteractionKind) -> Self {
        Self {
            event_id: event_id.into(),
            step,
            kind,
            agent: None,
            partner: None,
            feature: None,
            value: None,
        }
    }

    pub fn with_agent(mut self, agent: usize) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn with_partner(mut self, partner: usize) -> Self {
        self.partner = Some(partner);
        self
    }

    pub fn with_change(mut self, feature: usize, value: u32) -> Self {
        self.feature = Some(feature);
        self.value = Some(value);
        self
    }
}
