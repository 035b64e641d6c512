//! Structural view of the network: a petgraph index rebuilt from the
//! parent lists, plus cycle detection and topological ordering.

pub mod dag_enforcement;
pub mod indexed;

pub use indexed::IndexedGraph;
