//! Determinism verification tests
//!
//! Tests to ensure a run produces identical results given the same seed.

use axelrod_sim::{Config, Runner, TopologyKind};
use std::path::Path;

fn lattice_config(seed: u64, dir: &Path) -> Config {
    let mut config = Config::default();
    config.simulation.seed = seed;
    config.simulation.max_steps = 5_000;
    config.simulation.check_interval = 100;
    config.simulation.snapshot_interval = 1_000;
    config.culture.features = 4;
    config.culture.traits = 6;
    config.topology.kind = TopologyKind::Lattice;
    config.topology.width = 6;
    config.topology.height = 6;
    config.output.dir = dir.to_path_buf();
    config.output.write_snapshots = false;
    config
}

fn final_cultures(runner: &Runner) -> Vec<Vec<u32>> {
    runner
        .network()
        .list_cultures()
        .unwrap()
        .into_iter()
        .map(|(_, culture)| culture.to_vec())
        .collect()
}

/// Same seed, same initial cultures
#[test]
fn test_initialization_determinism() {
    let dir = tempfile::tempdir().unwrap();
    let first = Runner::new(lattice_config(42, dir.path())).unwrap();
    let second = Runner::new(lattice_config(42, dir.path())).unwrap();

    assert_eq!(final_cultures(&first), final_cultures(&second));
}

/// Same seed, same run
#[test]
fn test_run_determinism() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    let mut first = Runner::new(lattice_config(7, dir_a.path())).unwrap();
    let mut second = Runner::new(lattice_config(7, dir_b.path())).unwrap();
    let a = first.run().unwrap();
    let b = second.run().unwrap();

    assert_eq!(a.steps, b.steps);
    assert_eq!(a.converged, b.converged);
    assert_eq!(a.copies, b.copies);
    assert_eq!(a.distinct_cultures, b.distinct_cultures);
    assert_eq!(a.largest_cluster, b.largest_cluster);
    assert_eq!(first.stats().history(), second.stats().history());
    assert_eq!(final_cultures(&first), final_cultures(&second));

    // Run ids are random per run
    assert_ne!(a.run_id, b.run_id);
}

/// Different seeds start from different cultures
#[test]
fn test_different_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let first = Runner::new(lattice_config(42, dir.path())).unwrap();
    let second = Runner::new(lattice_config(43, dir.path())).unwrap();

    assert_ne!(final_cultures(&first), final_cultures(&second));
}
