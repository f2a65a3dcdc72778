//! Error types for timer operations

use thiserror::Error;

/// Rejected duration input; the mutation is refused and prior state kept
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("duration must be between {min} and {max} minutes, got {minutes}")]
    MinutesOutOfRange { minutes: i64, min: u32, max: u32 },
}

/// Errors surfaced by the shared application state
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to lock timer engine: {0}")]
    Lock(String),
}
