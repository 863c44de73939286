//! Domain error model.

use chrono::NaiveDate;
use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, stock
/// rules, catalog membership). File and document problems belong to the
/// persistence layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A product with the same identifier is already in the catalog.
    #[error("product ID {0} already exists")]
    DuplicateProduct(ProductId),

    /// No product with this identifier is in the catalog.
    #[error("product ID {0} not found")]
    ProductNotFound(ProductId),

    /// The sale asked for a non-positive quantity or more than is in stock.
    #[error("not enough stock for product {id} (requested: {requested}, available: {available})")]
    InsufficientStock {
        id: ProductId,
        requested: i64,
        available: u64,
    },

    /// Perishable product past its expiry date.
    #[error("product {id} expired on {expired_on}")]
    ExpiredProduct { id: ProductId, expired_on: NaiveDate },

    /// Restock amount was not positive (or would overflow the stock counter).
    #[error("cannot restock product {id} by {amount}")]
    InvalidRestock { id: ProductId, amount: i64 },

    /// A value failed validation (e.g. empty name, negative price).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(id: &ProductId) -> Self {
        Self::DuplicateProduct(id.clone())
    }

    pub fn not_found(id: &ProductId) -> Self {
        Self::ProductNotFound(id.clone())
    }
}
