//! Small hand-built networks with known behavior.

use axelrod_core::{CulturalNetwork, CultureError, IsolatedPolicy, NodeIndex, StepOutcome};
use petgraph::graph::UnGraph;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn two_clique(first: Vec<u32>, second: Vec<u32>, traits: u32, seed: u64) -> CulturalNetwork {
    let graph = UnGraph::<(), ()>::from_edges([(0u32, 1u32)]);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut network = CulturalNetwork::new(graph);
    network
        .create_cultural_network(first.len(), traits, &mut rng)
        .unwrap();
    network.set_culture(NodeIndex::new(0), first).unwrap();
    network.set_culture(NodeIndex::new(1), second).unwrap();
    network
}

#[test]
fn test_agreeing_pair_is_fixed_immediately() {
    let network = two_clique(vec![2], vec![2], 2, 1);
    assert_eq!(network.fixed_point(), Ok(true));
}

#[test]
fn test_disagreeing_single_feature_pair_never_converges() {
    let mut network = two_clique(vec![1], vec![2], 2, 1);
    let mut rng = SmallRng::seed_from_u64(1);

    // Similarity is 0, so the copy draw always fails; with one feature the
    // pair also shares nothing, which already counts as a fixed point.
    assert_eq!(network.common_features(NodeIndex::new(0), NodeIndex::new(1)), Ok(0));
    for _ in 0..1000 {
        let outcome = network.interact(&mut rng, &mut ()).unwrap();
        assert!(matches!(outcome, StepOutcome::Rejected { .. }));
    }
    assert_ne!(
        network.culture(NodeIndex::new(0)).unwrap(),
        network.culture(NodeIndex::new(1)).unwrap()
    );
    assert_eq!(network.fixed_point(), Ok(true));
    assert_eq!(network.network_cultures().unwrap().1, 2);
}

#[test]
fn test_random_single_feature_pairs() {
    for seed in 0..20u64 {
        let graph = UnGraph::<(), ()>::from_edges([(0u32, 1u32)]);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut network = CulturalNetwork::new(graph);
        network.create_cultural_network(1, 2, &mut rng).unwrap();

        let before = network.network_cultures().unwrap();
        for _ in 0..200 {
            network.step(&mut rng).unwrap();
        }
        assert_eq!(network.network_cultures().unwrap(), before);
        assert_eq!(network.fixed_point(), Ok(true));
    }
}

#[test]
fn test_one_differing_feature_converges() {
    let trials = 200;
    let mut converged = 0;

    for seed in 0..trials {
        let mut network = two_clique(vec![1, 2, 3], vec![1, 2, 1], 3, seed);
        let mut rng = SmallRng::seed_from_u64(seed);
        assert_eq!(network.fixed_point(), Ok(false));

        for _ in 0..50 {
            network.step(&mut rng).unwrap();
        }
        if network.culture(NodeIndex::new(0)).unwrap() == network.culture(NodeIndex::new(1)).unwrap() {
            converged += 1;
            assert_eq!(network.fixed_point(), Ok(true));
        }
    }

    // Each step copies with probability 2/3, so 50 steps all but guarantee it.
    assert!(converged as f64 / trials as f64 > 0.99, "converged {} / {}", converged, trials);
}

#[test]
fn test_isolated_node_on_a_line() {
    let mut graph = UnGraph::<(), ()>::from_edges([(0u32, 1u32), (1, 2)]);
    let lonely = graph.add_node(());
    let mut rng = SmallRng::seed_from_u64(31);

    let mut network = CulturalNetwork::new(graph.clone());
    network.create_cultural_network(3, 3, &mut rng).unwrap();
    for _ in 0..500 {
        let outcome = network.interact(&mut rng, &mut ()).unwrap();
        assert_ne!(outcome.agent(), Some(lonely));
    }

    let mut skipping = CulturalNetwork::new(graph.clone()).with_isolated_policy(IsolatedPolicy::Skip);
    skipping.create_cultural_network(3, 3, &mut rng).unwrap();
    let mut saw_isolated = false;
    for _ in 0..500 {
        if let StepOutcome::Isolated { agent } = skipping.interact(&mut rng, &mut ()).unwrap() {
            assert_eq!(agent, lonely);
            saw_isolated = true;
        }
    }
    assert!(saw_isolated);

    let mut failing = CulturalNetwork::new(graph).with_isolated_policy(IsolatedPolicy::Fail);
    failing.create_cultural_network(3, 3, &mut rng).unwrap();
    let before: Vec<Vec<u32>> = failing
        .list_cultures()
        .unwrap()
        .into_iter()
        .map(|(_, c)| c.to_vec())
        .collect();
    let mut failures = 0;
    for _ in 0..500 {
        match failing.interact(&mut rng, &mut ()) {
            Err(CultureError::NoNeighbors(node)) => {
                assert_eq!(node, lonely.index());
                failures += 1;
            }
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => {}
        }
    }
    assert!(failures > 0);
    assert_eq!(
        failing.culture(lonely).unwrap(),
        before[lonely.index()].as_slice()
    );

    // An isolated node never blocks a fixed point
    failing.set_culture(NodeIndex::new(0), vec![1, 1, 1]).unwrap();
    failing.set_culture(NodeIndex::new(1), vec![1, 1, 1]).unwrap();
    failing.set_culture(NodeIndex::new(2), vec![1, 1, 1]).unwrap();
    assert_eq!(failing.fixed_point(), Ok(true));
}

#[test]
fn test_lattice_reaches_fixed_point() {
    let width = 6u32;
    let mut edges = Vec::new();
    for row in 0..width {
        for col in 0..width {
            let node = row * width + col;
            if col + 1 < width {
                edges.push((node, node + 1));
            }
            if row + 1 < width {
                edges.push((node, node + width));
            }
        }
    }
    let graph = UnGraph::<(), ()>::from_edges(edges);
    let mut rng = SmallRng::seed_from_u64(8);
    let mut network = CulturalNetwork::new(graph);
    network.create_cultural_network(3, 2, &mut rng).unwrap();

    let mut steps = 0u64;
    while !network.fixed_point().unwrap() {
        for _ in 0..100 {
            network.step(&mut rng).unwrap();
        }
        steps += 100;
        assert!(steps < 2_000_000, "lattice did not converge");
    }

    let (sizes, largest) = network.cultural_sizes_and_max().unwrap();
    assert_eq!(sizes.iter().sum::<usize>(), 36);
    assert!(largest >= 1);
}
