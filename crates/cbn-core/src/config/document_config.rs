use serde::{Deserialize, Serialize};

use super::defaults;

/// Defaults applied by document-level editing operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Prior given to a freshly placed node.
    pub default_prior: f64,
    /// Offset of a pasted clone relative to the copied instance.
    pub clone_offset: [f64; 2],
    /// Kind tag for a node placed without one.
    pub default_kind: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_prior: defaults::DEFAULT_NEW_NODE_PRIOR,
            clone_offset: defaults::DEFAULT_CLONE_OFFSET,
            default_kind: defaults::DEFAULT_NODE_KIND.to_string(),
        }
    }
}
