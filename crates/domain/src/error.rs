//! Domain error types.

use common::ItemId;
use store::StoreError;
use thiserror::Error;

/// Rejections of a checkout cart, raised before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Cart is empty.")]
    Empty,

    #[error("Quantity for item {item_id} must be at least 1, got {quantity}.")]
    InvalidQuantity { item_id: ItemId, quantity: i64 },
}

/// Rejections of a new catalog item, raised before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Title is required.")]
    TitleRequired,

    #[error("Title must be at most {max} characters, got {length}.")]
    TitleTooLong { length: usize, max: usize },
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The cart was rejected; nothing was written.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The new item was rejected; nothing was written.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// The checkout transaction failed and was rolled back.
    #[error("Checkout transaction failed: {0}")]
    TransactionFailed(#[source] StoreError),

    /// A store error outside of checkout.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    /// True for errors caused by caller input rather than the store.
    pub fn is_input_error(&self) -> bool {
        matches!(self, DomainError::Cart(_) | DomainError::Item(_))
    }
}
