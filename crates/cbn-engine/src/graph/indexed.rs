//! petgraph::StableGraph wrapper keyed by variable name.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;

/// The underlying directed graph type. Edges point parent → child.
pub type CausalStableGraph = StableGraph<String, (), Directed>;

/// Wrapper providing name-indexed access to the causal structure.
pub struct IndexedGraph {
    /// The petgraph stable graph.
    pub graph: CausalStableGraph,
    /// Map from variable name → NodeIndex for O(1) lookup.
    pub node_index: HashMap<String, NodeIndex>,
}

impl IndexedGraph {
    /// Create an empty indexed graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Build from a node list and a child → parents mapping.
    pub fn from_parents<'a, N, P>(nodes: N, parents: P) -> Self
    where
        N: IntoIterator<Item = &'a str>,
        P: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut indexed = Self::new();
        for name in nodes {
            indexed.ensure_node(name);
        }
        for (child, child_parents) in parents {
            let child_idx = indexed.ensure_node(child);
            for parent in child_parents {
                let parent_idx = indexed.ensure_node(parent);
                indexed.graph.add_edge(parent_idx, child_idx, ());
            }
        }
        indexed
    }

    /// Get or create the node for `name`.
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    /// Look up a node index by name.
    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(name).copied()
    }

    /// Name stored at `idx`.
    pub fn name(&self, idx: NodeIndex) -> &str {
        self.graph.node_weight(idx).map(String::as_str).unwrap_or("?")
    }
}

impl Default for IndexedGraph {
    fn default() -> Self {
        Self::new()
    }
}
