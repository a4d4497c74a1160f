//! Axelrod model of cultural dissemination.
//!
//! Every node of an undirected graph carries a culture: a fixed-length vector
//! of discrete traits. An interaction step picks a random node and a random
//! neighbor; the neighbor copies one differing trait with probability equal
//! to the fraction of features they already share. Repeated steps grow
//! cultural clusters until the network reaches a fixed point where every
//! pair of neighbors is either identical or shares nothing.
//!
//! # Modules
//!
//! - [`network`]: the [`CulturalNetwork`] type, initialization and similarity
//! - [`step`]: the interaction step and its [`StepOutcome`]
//! - [`observer`]: hooks that see every step outcome
//! - [`clusters`]: distinct cultures, cluster sizes, node coloring
//! - [`fixed_point`]: absorbing-state detection
//! - [`snapshot`]: serializable snapshots
//!
//! # Example
//!
//! ```
//! use axelrod_core::CulturalNetwork;
//! use petgraph::graph::UnGraph;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0)]);
//! let mut rng = SmallRng::seed_from_u64(42);
//! let mut network = CulturalNetwork::new(graph);
//! network.create_cultural_network(5, 3, &mut rng)?;
//!
//! for _ in 0..1000 {
//!     network.step(&mut rng)?;
//! }
//! let (sizes, largest) = network.cultural_sizes_and_max()?;
//! assert_eq!(sizes.iter().sum::<usize>(), 3);
//! assert!(largest >= 1);
//! # Ok::<(), axelrod_core::CultureError>(())
//! ```

pub mod clusters;
pub mod error;
pub mod fixed_point;
pub mod network;
pub mod observer;
pub mod snapshot;
pub mod step;

pub use clusters::Cluster;
pub use error::CultureError;
pub use network::{CulturalNetwork, Culture};
pub use observer::{OutcomeRecorder, StepObserver, TraceObserver};
pub use step::{IsolatedPolicy, StepOutcome};

pub use petgraph::graph::NodeIndex;
