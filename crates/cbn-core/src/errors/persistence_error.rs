/// Errors raised while encoding or decoding saved documents.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed document {document}: {reason}")]
    Malformed { document: String, reason: String },
}
