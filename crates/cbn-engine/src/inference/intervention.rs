//! Causal intervention (the do-operator).

use cbn_core::errors::{CbnResult, InferenceError};
use cbn_core::models::Assignment;
use tracing::debug;

use super::{query, InferenceContext};
use crate::network::CausalBayesianNetwork;

/// `P(name = true | do(interventions), evidence)`.
///
/// Every intervened node loses its incoming edges and takes its fixed
/// value; the query then runs on that mutilated view with the intervened
/// values and `evidence` as observations. On a root this is the same as
/// conditioning on it.
pub fn intervention(
    network: &CausalBayesianNetwork,
    name: &str,
    interventions: &Assignment,
    evidence: &Assignment,
) -> CbnResult<f64> {
    let ctx = InferenceContext::mutilated(network, interventions);
    ctx.check_assignment(interventions)?;

    let mut observed = evidence.clone();
    for (var, &fixed) in interventions {
        if let Some(&seen) = evidence.get(var) {
            if seen != fixed {
                return Err(InferenceError::ConflictingAssignment {
                    name: var.clone(),
                    intervened: fixed,
                    observed: seen,
                }
                .into());
            }
        }
        observed.insert(var.clone(), fixed);
    }

    debug!(node = name, interventions = ?interventions, "intervention");
    query::query(&ctx, name, &observed)
}
