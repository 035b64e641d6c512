/// Conditional probability definition errors, raised at write time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CpdError {
    #[error("probability {value} for {node} is outside [0, 1]")]
    ProbabilityOutOfRange { node: String, value: f64 },

    #[error("combination for {node} has {actual} values, expected {expected}")]
    CombinationWidth {
        node: String,
        expected: usize,
        actual: usize,
    },

    #[error("scalar prior given for {node}, which has parents")]
    PriorOnNonRoot { node: String },

    #[error("invalid combination key {key:?}: only '0' and '1' are allowed")]
    InvalidBitstring { key: String },
}
