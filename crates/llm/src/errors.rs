use std::time::Duration;
use thiserror::Error;

/// Failure of a remote generation call
///
/// Every variant is user-retryable; nothing is retried automatically.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiGenerationError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("AI service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("AI request timed out after {0:?}")]
    Timeout(Duration),

    /// The response arrived but does not have the requested shape
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("AI service returned no content")]
    EmptyResponse,
}

impl AiGenerationError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}
