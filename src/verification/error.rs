use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("missing record identifier")]
    MissingIdentifier,
    #[error("failed to persist verification data")]
    Persistence(#[source] anyhow::Error),
    #[error("failed to generate verification key")]
    Random,
    #[error("verification key not found")]
    NotFound,
    #[error("verification code mismatch")]
    CodeMismatch,
    #[error("verification expired")]
    Expired,
    #[error("invalid verification timestamp: {0}")]
    InvalidTimestamp(String),
}
