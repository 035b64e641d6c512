//! Marginal propagation over the whole network.

use std::collections::BTreeMap;

use cbn_core::errors::CbnResult;

use super::{truth_table, InferenceContext};

/// `P(node = true)` for every node, recomputed from scratch.
///
/// Nodes are visited parents-first and each marginal is
/// `Σ combination_probability × conditional_probability` over its truth table.
pub fn marginal_probabilities(ctx: &InferenceContext<'_>) -> CbnResult<BTreeMap<String, f64>> {
    let mut marginals = BTreeMap::new();
    for node in ctx.network().topological_order()? {
        let p: f64 = truth_table::cpd_rows(ctx, &node)?
            .iter()
            .map(|row| row.combination_probability * row.conditional_probability)
            .sum();
        marginals.insert(node, p);
    }
    Ok(marginals)
}
