//! Ancestral joint evaluation.
//!
//! The joint probability of a partial assignment only depends on the
//! assigned variables and their ancestors: every other variable sums out to
//! one. The ancestral closure is walked in topological order, assigned
//! variables contribute `P(v = value | parents)` and free ancestors are
//! summed over both values. Parents are never assumed independent.
//!
//! Cost is up to `2^free` terms per call, fewer when zero-probability
//! branches are cut. `EngineConfig::max_terms` bounds the terms actually
//! visited.

use std::collections::{HashMap, HashSet};

use cbn_core::errors::{CbnResult, InferenceError};
use cbn_core::models::{Assignment, Combination};

use super::InferenceContext;

/// `P(assignment)` in the given view.
pub fn joint_probability(ctx: &InferenceContext<'_>, assignment: &Assignment) -> CbnResult<f64> {
    ctx.check_assignment(assignment)?;
    let fixed: HashMap<&str, bool> = assignment
        .iter()
        .map(|(name, &value)| (name.as_str(), value))
        .collect();
    joint_of(ctx, &fixed)
}

/// Joint probability of `fixed`, whose names are known to exist.
pub(crate) fn joint_of<'a>(
    ctx: &InferenceContext<'a>,
    fixed: &HashMap<&'a str, bool>,
) -> CbnResult<f64> {
    let order = ancestral_order(ctx, fixed.keys().copied());
    let max = ctx.network().config().max_terms;
    let mut budget = max;
    let mut values = fixed.clone();
    enumerate(ctx, &order, fixed, &mut values, &mut budget)
        .ok_or_else(|| InferenceError::TooManyTerms { max }.into())
}

/// The seeds and all their ancestors in this view, parents before children.
pub(crate) fn ancestral_order<'a, I>(ctx: &InferenceContext<'a>, seeds: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    fn visit<'a>(
        ctx: &InferenceContext<'a>,
        name: &'a str,
        done: &mut HashSet<&'a str>,
        order: &mut Vec<&'a str>,
    ) {
        if !done.insert(name) {
            return;
        }
        for parent in ctx.parents(name) {
            visit(ctx, parent, done, order);
        }
        order.push(name);
    }

    let mut seeds: Vec<&'a str> = seeds.into_iter().collect();
    seeds.sort_unstable();
    let mut done = HashSet::new();
    let mut order = Vec::new();
    for seed in seeds {
        visit(ctx, seed, &mut done, &mut order);
    }
    order
}

fn enumerate<'a>(
    ctx: &InferenceContext<'a>,
    order: &[&'a str],
    fixed: &HashMap<&'a str, bool>,
    values: &mut HashMap<&'a str, bool>,
    budget: &mut usize,
) -> Option<f64> {
    *budget = budget.checked_sub(1)?;
    let Some((&var, rest)) = order.split_first() else {
        return Some(1.0);
    };
    let parent_values: Combination = ctx
        .parents(var)
        .iter()
        .map(|p| values[p.as_str()])
        .collect();

    if let Some(&value) = fixed.get(var) {
        let p = ctx.p_value(var, value, &parent_values);
        if p == 0.0 {
            return Some(0.0);
        }
        return Some(p * enumerate(ctx, rest, fixed, values, budget)?);
    }

    let mut total = 0.0;
    for value in [true, false] {
        let p = ctx.p_value(var, value, &parent_values);
        if p == 0.0 {
            continue;
        }
        values.insert(var, value);
        total += p * enumerate(ctx, rest, fixed, values, budget)?;
    }
    values.remove(var);
    Some(total)
}
