//! # cbn-core
//!
//! Foundation crate for the causal Bayesian network engine.
//! Defines the shared models, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::CbnConfig;
pub use errors::{CbnError, CbnResult};
pub use models::{Assignment, Combination, Cpd, CpdRow, NodeKind};
