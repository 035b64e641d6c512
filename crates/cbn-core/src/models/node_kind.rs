//! Semantic tag attached to a node by the diagram editor.

use serde::{Deserialize, Serialize};

/// What a node represents in a safety analysis. Carries no inference
/// semantics; only the relationship rules of the editor consult it.
///
/// Unrecognized tags are kept verbatim in [`NodeKind::Other`] so they
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Triggering condition.
    Trigger,
    /// Functional insufficiency.
    Insufficiency,
    /// Malfunction (a sink: it never causes other nodes).
    Malfunction,
    /// Plain variable.
    Variable,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Trigger => "trigger",
            Self::Insufficiency => "insufficiency",
            Self::Malfunction => "malfunction",
            Self::Variable => "variable",
            Self::Other(s) => s,
        }
    }

    /// Why an edge from `self` to `target` is not allowed, if it is not.
    pub fn edge_violation(&self, target: &NodeKind) -> Option<&'static str> {
        match (self, target) {
            (Self::Malfunction, _) => Some("malfunction nodes cannot connect to other nodes"),
            (Self::Insufficiency, Self::Trigger) => {
                Some("functional insufficiency cannot connect to a triggering condition")
            }
            _ => None,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        match s {
            "trigger" => Self::Trigger,
            "insufficiency" => Self::Insufficiency,
            "malfunction" => Self::Malfunction,
            "variable" => Self::Variable,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
