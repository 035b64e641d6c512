use serde::{Deserialize, Serialize};

use super::defaults;

/// Inference engine limits.
///
/// Enumeration is exponential: `2^parents` rows per truth table and up to
/// `2^free-ancestors` terms per joint evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of parents a node may have when its truth table is built.
    pub max_parents: usize,
    /// Maximum number of partial terms visited in one joint evaluation,
    /// counted after zero-probability branches are cut.
    pub max_terms: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_parents: defaults::DEFAULT_MAX_PARENTS,
            max_terms: defaults::DEFAULT_MAX_TERMS,
        }
    }
}
