//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in variation and pricing operations.
///
/// The variation editing surface reports duplicate-creation and
/// missing-removal as boolean failures; these variants carry the detail for
/// the notification adapter and for callers that want the typed result.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// A combination with the same attribute tuple already exists.
    #[error("Combination already exists: {0}")]
    DuplicateCombination(String),

    /// No combination matches the given attribute tuple.
    #[error("Combination not found: {0}")]
    CombinationNotFound(String),

    /// No combination matches the given id.
    #[error("Unknown combination id: {0}")]
    UnknownCombinationId(String),

    /// Grade pricing requested on a product without a grade configuration.
    #[error("Product has no grade configuration")]
    MissingGradeConfig,

    /// Custom mix pricing requested without a selection.
    #[error("Custom mix pricing requires a size selection")]
    MissingCustomSelection,

    /// Grade size/pair lists are absent or inconsistent.
    #[error("Malformed grade data: {0}")]
    MalformedGradeData(String),

    /// Negative or otherwise unusable quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Discount percentage outside 0..=100.
    #[error("Invalid discount percentage: {0}")]
    InvalidPercentage(f64),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persistence boundary error.
    #[cfg(feature = "storage")]
    #[error("Store error: {0}")]
    Store(String),
}

#[cfg(feature = "storage")]
impl From<shopdesk_store::StoreError> for CommerceError {
    fn from(e: shopdesk_store::StoreError) -> Self {
        CommerceError::Store(e.to_string())
    }
}
