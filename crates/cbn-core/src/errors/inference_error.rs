/// Errors raised while evaluating queries, interventions, and truth tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("assignment references unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("{name} is fixed to {intervened} by intervention but observed as {observed}")]
    ConflictingAssignment {
        name: String,
        intervened: bool,
        observed: bool,
    },

    #[error("{node} has {count} parents, limit is {max}")]
    TooManyParents { node: String, count: usize, max: usize },

    #[error("joint enumeration exceeds {max} terms")]
    TooManyTerms { max: usize },
}
