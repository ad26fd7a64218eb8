//! Application Layer Errors
//!
//! Everything here is meant to be reported by the action handler that
//! issued the command; none of it is fatal.

use domain::{ProductId, ValidationError};
use llm::AiGenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The form cannot be saved as entered
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A structured generation request failed
    #[error(transparent)]
    Generation(#[from] AiGenerationError),

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("No product is open in the detail view")]
    NoDetailView,

    #[error("No deletion is awaiting confirmation")]
    NoPendingDeletion,

    /// The view changed while the request was in flight
    #[error("Response arrived after the view changed and was discarded")]
    StaleResponse,
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
