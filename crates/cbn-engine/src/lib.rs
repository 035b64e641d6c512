//! # cbn-engine
//!
//! Causal Bayesian network engine over binary variables.
//! DAG-enforced graph & CPD store, exact inference by ancestral enumeration,
//! do-interventions on a mutilated view, marginal propagation, shared
//! diagram documents, and JSON persistence.

pub mod document;
pub mod graph;
pub mod inference;
pub mod network;
pub mod persistence;
pub mod shared;

pub use document::{CausalBayesianNetworkDoc, Position};
pub use inference::InferenceContext;
pub use network::CausalBayesianNetwork;
pub use persistence::{DocRecord, ProjectRecord};
pub use shared::{Shared, SharedKinds, SharedNetwork};
