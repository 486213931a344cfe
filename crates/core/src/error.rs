//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (catalog
/// validation, bad user input). Storage failures belong to the shell crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A user-supplied value was rejected (e.g. a count that is not an integer).
    #[error("invalid input for {product}: {reason}")]
    InvalidInput { product: String, reason: String },

    /// An edit named a product outside the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// A value failed validation (e.g. malformed catalog).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn invalid_input(product: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            product: product.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_product(product: impl Into<String>) -> Self {
        Self::UnknownProduct(product.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for errors caused by what the user typed into an edit form.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::UnknownProduct(_))
    }
}
