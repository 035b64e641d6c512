//! Error handling for the CBN engine.
//! One error enum per subsystem, `thiserror` only, aggregated by [`CbnError`].

pub mod config_error;
pub mod cpd_error;
pub mod graph_error;
pub mod inference_error;
pub mod persistence_error;

pub use config_error::ConfigError;
pub use cpd_error::CpdError;
pub use graph_error::GraphError;
pub use inference_error::InferenceError;
pub use persistence_error::PersistenceError;

/// Top-level error for every fallible engine operation.
#[derive(Debug, thiserror::Error)]
pub enum CbnError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("cpd error: {0}")]
    Cpd(#[from] CpdError),

    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("shared network lock poisoned: {0}")]
    Concurrency(String),
}

pub type CbnResult<T> = Result<T, CbnError>;
