//! Exact inference by enumeration.
//!
//! All entry points read the store afresh on every call; nothing is cached
//! between calls. A do-intervention is an overlay on the store: an intervened
//! node has no parents and a deterministic value, and the store itself is
//! never copied or mutated.

pub mod intervention;
pub mod joint;
pub mod marginals;
pub mod query;
pub mod truth_table;

use std::collections::BTreeMap;

use cbn_core::errors::{CbnResult, InferenceError};
use cbn_core::models::{Assignment, CpdRow};

use crate::network::CausalBayesianNetwork;

static NO_INTERVENTIONS: Assignment = BTreeMap::new();

/// The network as seen under a (possibly empty) set of interventions.
#[derive(Clone, Copy)]
pub struct InferenceContext<'a> {
    network: &'a CausalBayesianNetwork,
    interventions: &'a Assignment,
}

impl<'a> InferenceContext<'a> {
    /// Plain observational view.
    pub fn observational(network: &'a CausalBayesianNetwork) -> Self {
        Self {
            network,
            interventions: &NO_INTERVENTIONS,
        }
    }

    /// Mutilated view: every node in `interventions` has its incoming edges
    /// severed and its value fixed.
    pub fn mutilated(network: &'a CausalBayesianNetwork, interventions: &'a Assignment) -> Self {
        Self {
            network,
            interventions,
        }
    }

    pub fn network(&self) -> &'a CausalBayesianNetwork {
        self.network
    }

    /// Nodes fixed by intervention in this view.
    pub fn interventions(&self) -> &'a Assignment {
        self.interventions
    }

    /// Parents of `name` in this view.
    pub fn parents(&self, name: &str) -> &'a [String] {
        if self.interventions.contains_key(name) {
            &[]
        } else {
            self.network.parents(name)
        }
    }

    /// `P(name = true | parent values)` in this view.
    pub fn p_true(&self, name: &str, parent_values: &[bool]) -> f64 {
        match self.interventions.get(name) {
            Some(&fixed) => {
                if fixed {
                    1.0
                } else {
                    0.0
                }
            }
            None => self.network.conditional(name, parent_values),
        }
    }

    /// `P(name = value | parent values)` in this view.
    pub fn p_value(&self, name: &str, value: bool, parent_values: &[bool]) -> f64 {
        let p = self.p_true(name, parent_values);
        if value {
            p
        } else {
            1.0 - p
        }
    }

    /// Fail if any name in `assignment` is not a registered variable.
    pub fn check_assignment(&self, assignment: &Assignment) -> CbnResult<()> {
        for name in assignment.keys() {
            if !self.network.contains(name) {
                return Err(InferenceError::UnknownVariable { name: name.clone() }.into());
            }
        }
        Ok(())
    }
}

// Convenience entry points on the store itself.
impl CausalBayesianNetwork {
    /// Truth table of `name`. See [`truth_table::cpd_rows`].
    pub fn cpd_rows(&self, name: &str) -> CbnResult<Vec<CpdRow>> {
        truth_table::cpd_rows(&InferenceContext::observational(self), name)
    }

    /// `P(name = true | evidence)`. See [`query::query`].
    pub fn query(&self, name: &str, evidence: &Assignment) -> CbnResult<f64> {
        query::query(&InferenceContext::observational(self), name, evidence)
    }

    /// `P(name = true | do(interventions), evidence)`.
    /// See [`intervention::intervention`].
    pub fn intervention(
        &self,
        name: &str,
        interventions: &Assignment,
        evidence: &Assignment,
    ) -> CbnResult<f64> {
        intervention::intervention(self, name, interventions, evidence)
    }

    /// `P(node = true)` for every node. See [`marginals::marginal_probabilities`].
    pub fn marginal_probabilities(&self) -> CbnResult<BTreeMap<String, f64>> {
        marginals::marginal_probabilities(&InferenceContext::observational(self))
    }

    /// Marginals of the mutilated network under `interventions`.
    pub fn interventional_marginals(
        &self,
        interventions: &Assignment,
    ) -> CbnResult<BTreeMap<String, f64>> {
        let ctx = InferenceContext::mutilated(self, interventions);
        ctx.check_assignment(interventions)?;
        marginals::marginal_probabilities(&ctx)
    }

    /// Exact joint probability of a partial assignment.
    /// See [`joint::joint_probability`].
    pub fn joint_probability(&self, assignment: &Assignment) -> CbnResult<f64> {
        joint::joint_probability(&InferenceContext::observational(self), assignment)
    }
}
