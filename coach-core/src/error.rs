//! Error types for the coach backend

use thiserror::Error;

/// Coach-wide error type
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoachError {
    pub fn config(msg: impl Into<String>) -> Self {
        CoachError::Config(msg.into())
    }
}

/// Result type alias for coach operations
pub type CoachResult<T> = Result<T, CoachError>;
