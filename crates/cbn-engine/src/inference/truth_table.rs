//! Truth-table generation (`cpd_rows`).

use std::collections::HashMap;

use cbn_core::errors::{CbnResult, InferenceError};
use cbn_core::models::combination;
use cbn_core::models::CpdRow;

use super::joint::joint_of;
use super::InferenceContext;

/// One row per parent-value combination of `name`, in canonical order
/// (first parent varying slowest, `true` before `false`).
///
/// Each row carries the conditional probability after the default and
/// auto-fill policies, the exact joint probability of the combination, and
/// their product. A root yields the single row `((), prior, 1.0, prior)`.
pub fn cpd_rows(ctx: &InferenceContext<'_>, name: &str) -> CbnResult<Vec<CpdRow>> {
    ctx.network().require(name)?;
    let parents = ctx.parents(name);
    let max = ctx.network().config().max_parents;
    if parents.len() > max {
        return Err(InferenceError::TooManyParents {
            node: name.to_string(),
            count: parents.len(),
            max,
        }
        .into());
    }

    if parents.is_empty() {
        return Ok(vec![CpdRow::new(Vec::new(), ctx.p_true(name, &[]), 1.0)]);
    }

    combination::enumerate(parents.len())
        .map(|combo| -> CbnResult<CpdRow> {
            let fixed: HashMap<&str, bool> = parents
                .iter()
                .map(String::as_str)
                .zip(combo.iter().copied())
                .collect();
            let combination_probability = joint_of(ctx, &fixed)?;
            let conditional = ctx.p_true(name, &combo);
            Ok(CpdRow::new(combo, conditional, combination_probability))
        })
        .collect()
}
