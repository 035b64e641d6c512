//! Exact conditional queries.

use std::collections::HashMap;

use cbn_core::errors::CbnResult;
use cbn_core::models::Assignment;
use tracing::{debug, warn};

use super::joint::joint_of;
use super::InferenceContext;

/// `P(name = true | evidence)` in the given view.
///
/// Observed nodes answer `1.0`/`0.0` directly. Otherwise the answer is
/// `P(name = true, evidence) / P(evidence)` over the ancestral closure of
/// `name` and the evidence: with no evidence a root returns its prior, and
/// evidence on parents restricts the enumeration to consistent combinations.
/// Evidence of probability zero yields `0.0`.
pub fn query(ctx: &InferenceContext<'_>, name: &str, evidence: &Assignment) -> CbnResult<f64> {
    ctx.network().require(name)?;
    ctx.check_assignment(evidence)?;
    if let Some(&observed) = evidence.get(name) {
        return Ok(if observed { 1.0 } else { 0.0 });
    }

    let p = if evidence.keys().all(|n| ctx.parents(n).is_empty()) {
        query_given_roots(ctx, name, evidence)?
    } else {
        query_by_ratio(ctx, name, evidence)?
    };
    debug!(node = name, evidence = evidence.len(), p, "query");
    Ok(p)
}

/// Evidence only on parentless nodes: observing a root is the same as
/// fixing it, so the answer is a single joint in the fixed view.
fn query_given_roots(
    ctx: &InferenceContext<'_>,
    name: &str,
    evidence: &Assignment,
) -> CbnResult<f64> {
    for (root, &value) in evidence {
        if ctx.p_value(root, value, &[]) == 0.0 {
            warn!(node = name, root = %root, value, "evidence has probability zero");
            return Ok(0.0);
        }
    }
    let mut fixed_roots = ctx.interventions().clone();
    fixed_roots.extend(evidence.iter().map(|(n, &v)| (n.clone(), v)));
    let view = InferenceContext::mutilated(ctx.network(), &fixed_roots);
    joint_of(&view, &HashMap::from([(name, true)]))
}

fn query_by_ratio(ctx: &InferenceContext<'_>, name: &str, evidence: &Assignment) -> CbnResult<f64> {
    let mut fixed: HashMap<&str, bool> = evidence
        .iter()
        .map(|(n, &v)| (n.as_str(), v))
        .collect();
    let denominator = joint_of(ctx, &fixed)?;
    if denominator == 0.0 {
        warn!(node = name, evidence = ?evidence, "evidence has probability zero");
        return Ok(0.0);
    }
    fixed.insert(name, true);
    Ok(joint_of(ctx, &fixed)? / denominator)
}
