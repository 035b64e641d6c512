//! Conditional probability definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::combination::{self, Combination};
use crate::errors::CpdError;

/// The probability that a node is `true`, either as a scalar prior (roots)
/// or as a table keyed by parent-value combination.
///
/// A table is stored verbatim: combinations it does not list read as `0.0`.
/// Serialized as a number or as an object keyed by bitstring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CpdRepr", into = "CpdRepr")]
pub enum Cpd {
    Prior(f64),
    Table(BTreeMap<Combination, f64>),
}

impl Cpd {
    /// Build a table from `(combination, probability)` entries.
    pub fn table<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Combination, f64)>,
    {
        Self::Table(entries.into_iter().collect())
    }

    /// Probability of `true` under `combination`; missing table entries are `0.0`.
    pub fn probability(&self, combination: &[bool]) -> f64 {
        match self {
            Self::Prior(p) => *p,
            Self::Table(table) => table.get(combination).copied().unwrap_or(0.0),
        }
    }

    /// Check ranges and key widths for a node with `parent_count` parents.
    pub fn validate(&self, node: &str, parent_count: usize) -> Result<(), CpdError> {
        match self {
            Self::Prior(p) => {
                if parent_count > 0 {
                    return Err(CpdError::PriorOnNonRoot {
                        node: node.to_string(),
                    });
                }
                check_probability(node, *p)
            }
            Self::Table(table) => {
                for (combination, p) in table {
                    if combination.len() != parent_count {
                        return Err(CpdError::CombinationWidth {
                            node: node.to_string(),
                            expected: parent_count,
                            actual: combination.len(),
                        });
                    }
                    check_probability(node, *p)?;
                }
                Ok(())
            }
        }
    }
}

/// Default conditional policy for a non-root without a CPD: `1.0` iff every
/// parent is `true`. A single parent is copied, several parents are AND-ed.
pub fn default_conditional(combination: &[bool]) -> f64 {
    if combination.iter().all(|&v| v) {
        1.0
    } else {
        0.0
    }
}

/// Reject NaN and values outside `[0, 1]`.
pub fn check_probability(node: &str, value: f64) -> Result<(), CpdError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CpdError::ProbabilityOutOfRange {
            node: node.to_string(),
            value,
        })
    }
}

/// On-disk shape: a bare number or a bitstring-keyed object.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CpdRepr {
    Prior(f64),
    Table(BTreeMap<String, f64>),
}

impl From<Cpd> for CpdRepr {
    fn from(cpd: Cpd) -> Self {
        match cpd {
            Cpd::Prior(p) => Self::Prior(p),
            Cpd::Table(table) => Self::Table(
                table
                    .into_iter()
                    .map(|(k, v)| (combination::encode(&k), v))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<CpdRepr> for Cpd {
    type Error = CpdError;

    fn try_from(repr: CpdRepr) -> Result<Self, Self::Error> {
        match repr {
            CpdRepr::Prior(p) => Ok(Self::Prior(p)),
            CpdRepr::Table(table) => table
                .into_iter()
                .map(|(k, v)| combination::decode(&k).map(|c| (c, v)))
                .collect::<Result<BTreeMap<_, _>, CpdError>>()
                .map(Self::Table),
        }
    }
}
