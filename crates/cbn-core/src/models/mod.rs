//! Shared data models: combinations, CPDs, truth-table rows, and node kinds.

pub mod combination;
pub mod cpd;
pub mod cpd_row;
pub mod node_kind;

use std::collections::BTreeMap;

pub use combination::Combination;
pub use cpd::Cpd;
pub use cpd_row::CpdRow;
pub use node_kind::NodeKind;

/// A partial assignment of boolean values to variables, used for evidence
/// and for do-interventions.
pub type Assignment = BTreeMap<String, bool>;
