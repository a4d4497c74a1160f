//! Shared event and snapshot types for the Axelrod culture simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! `axelrod-core` builds them and `axelrod-sim` writes them to disk.

pub mod event;
pub mod snapshot;

// Re-export event types
pub use event::{generate_event_id, InteractionEvent, InteractionKind};

// Re-export snapshot types
pub use snapshot::{
    generate_snapshot_id, ClusterMetrics, ClusterSnapshot, NetworkSnapshot, NodeSnapshot,
};
