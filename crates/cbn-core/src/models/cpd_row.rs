use serde::{Deserialize, Serialize};

use super::Combination;

/// One row of a node's truth table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpdRow {
    /// Parent values, in parent declaration order.
    pub combination: Combination,
    /// `P(node = true | combination)` after the default/auto-fill policy.
    pub conditional_probability: f64,
    /// Joint probability that the parents take `combination`.
    pub combination_probability: f64,
    /// `combination_probability * conditional_probability`.
    pub joint_probability: f64,
}

impl CpdRow {
    pub fn new(combination: Combination, conditional: f64, combination_probability: f64) -> Self {
        Self {
            combination,
            conditional_probability: conditional,
            combination_probability,
            joint_probability: combination_probability * conditional,
        }
    }
}
