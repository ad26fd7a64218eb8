//! Domain Errors - business rule violations

use thiserror::Error;

/// Raised when a draft cannot be saved as a product.
///
/// Reported inline by the form; the draft itself is left untouched so the
/// user can fix the offending field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Product name is required")]
    MissingName,

    #[error("Product category is required")]
    MissingCategory,

    /// Price must be a finite, non-negative number
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Please enter a product name and category first")]
    DescriptionNeedsNameAndCategory,
}

/// Invariant violations for generated content values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("Field '{0}' must not be blank")]
    BlankField(&'static str),

    #[error("Clarity score {0} is outside 1..=10")]
    ClarityScoreOutOfRange(f64),

    #[error("Expected 2 to 3 suggestions, got {0}")]
    SuggestionCount(usize),
}
