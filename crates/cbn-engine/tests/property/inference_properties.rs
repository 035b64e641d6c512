//! Property tests for cbn-engine over random DAGs.

use proptest::prelude::*;

use cbn_core::models::{Assignment, Cpd};
use cbn_engine::graph::dag_enforcement;
use cbn_engine::CausalBayesianNetwork;

const TOLERANCE: f64 = 1e-9;

/// Build a random network over `n` nodes. Edges that would close a cycle
/// are skipped; every third node keeps the default policy.
fn build_random_network(n: usize, edges: &[(usize, usize)], probs: &[f64]) -> CausalBayesianNetwork {
    let mut net = CausalBayesianNetwork::new();
    for i in 0..n {
        net.add_root(&format!("n{i}"), probs[i % probs.len()]).unwrap();
    }
    for &(src, tgt) in edges {
        if src < n && tgt < n && src != tgt {
            // Rejected edges are cycles; ignore them.
            let _ = net.add_edge(&format!("n{src}"), &format!("n{tgt}"));
        }
    }
    for (i, name) in net.nodes().to_vec().iter().enumerate() {
        let width = net.parents(name).len();
        if width == 0 || i % 3 == 0 {
            continue;
        }
        let table = cbn_core::models::combination::enumerate(width)
            .enumerate()
            .map(|(k, combo)| (combo, probs[(i + k) % probs.len()]));
        net.set_cpd(name, Some(Cpd::table(table))).unwrap();
    }
    net
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n, 0..n), 0..n * 2)
}

fn prob_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0_f64..=1.0_f64, 1..6)
}

proptest! {
    #[test]
    fn store_never_holds_a_cycle(
        edges in edge_strategy(12),
        probs in prob_strategy(),
    ) {
        let net = build_random_network(12, &edges, &probs);
        prop_assert!(net.topological_order().is_ok());
        let indexed = cbn_engine::graph::IndexedGraph::from_parents(
            net.nodes().iter().map(String::as_str),
            net.nodes().iter().map(|n| (n.as_str(), net.parents(n))),
        );
        prop_assert!(dag_enforcement::find_cycles(&indexed).is_empty());
    }
}

proptest! {
    #[test]
    fn marginals_are_probabilities(
        edges in edge_strategy(8),
        probs in prob_strategy(),
    ) {
        let net = build_random_network(8, &edges, &probs);
        let marginals = net.marginal_probabilities().unwrap();
        prop_assert_eq!(marginals.len(), 8);
        for (node, p) in &marginals {
            prop_assert!(
                (-TOLERANCE..=1.0 + TOLERANCE).contains(p),
                "marginal of {} out of range: {}", node, p
            );
        }
    }
}

proptest! {
    #[test]
    fn query_without_evidence_matches_marginal(
        edges in edge_strategy(8),
        probs in prob_strategy(),
    ) {
        let net = build_random_network(8, &edges, &probs);
        let marginals = net.marginal_probabilities().unwrap();
        for node in net.nodes() {
            let q = net.query(node, &Assignment::new()).unwrap();
            prop_assert!(
                (q - marginals[node]).abs() < TOLERANCE,
                "query {} = {}, marginal = {}", node, q, marginals[node]
            );
        }
    }
}

proptest! {
    #[test]
    fn truth_table_rows_sum_to_one(
        edges in edge_strategy(8),
        probs in prob_strategy(),
    ) {
        let net = build_random_network(8, &edges, &probs);
        for node in net.nodes() {
            let rows = net.cpd_rows(node).unwrap();
            prop_assert_eq!(rows.len(), 1 << net.parents(node).len());
            let total: f64 = rows.iter().map(|r| r.combination_probability).sum();
            prop_assert!((total - 1.0).abs() < TOLERANCE, "rows of {} sum to {}", node, total);
        }
    }
}

proptest! {
    #[test]
    fn root_intervention_equals_conditioning(
        edges in edge_strategy(6),
        probs in prob_strategy(),
        value in any::<bool>(),
    ) {
        let net = build_random_network(6, &edges, &probs);
        let roots: Vec<String> = net.roots().into_iter().map(String::from).collect();
        for root in &roots {
            // Conditioning on an impossible root value answers 0.0 instead.
            let prior = net.conditional(root, &[]);
            if (value && prior == 0.0) || (!value && prior == 1.0) {
                continue;
            }
            let fixed: Assignment = [(root.clone(), value)].into_iter().collect();
            for node in net.nodes() {
                let by_do = net.intervention(node, &fixed, &Assignment::new()).unwrap();
                let by_obs = net.query(node, &fixed).unwrap();
                prop_assert_eq!(by_do.to_bits(), by_obs.to_bits());
            }
        }
    }
}
