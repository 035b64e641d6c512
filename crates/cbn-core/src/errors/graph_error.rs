/// Structural errors raised by the graph store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown node: {name}")]
    UnknownNode { name: String },

    #[error("node already exists: {name}")]
    DuplicateNode { name: String },

    #[error("parent {parent} listed more than once for {child}")]
    DuplicateParent { child: String, parent: String },

    #[error("cycle detected in causal graph: {path}")]
    CycleDetected { path: String },

    #[error("invalid relationship {from} -> {to}: {reason}")]
    InvalidRelationship {
        from: String,
        to: String,
        reason: String,
    },

    #[error("no diagram instance {index} for node {name}")]
    UnknownInstance { name: String, index: usize },
}
