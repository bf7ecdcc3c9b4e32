use thiserror::Error;

/// Validation failures raised while building domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("challenge index {index} is out of range (expected 0..{count})")]
    ChallengeOutOfRange { index: usize, count: usize },

    #[error("unknown assessment type: {0}")]
    UnknownAssessment(String),

    #[error("item identifier cannot be empty")]
    EmptyItem,

    #[error("user identifier cannot be empty")]
    EmptyUserId,
}
