//! Checkout cart.

use common::ItemId;

use crate::error::CartError;

/// One requested line: an item and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: ItemId,
    pub quantity: i64,
}

impl CartLine {
    /// Quantity used when a request leaves it out.
    pub const DEFAULT_QUANTITY: i64 = 1;

    pub fn new(item_id: i64, quantity: i64) -> Self {
        Self {
            item_id: ItemId::new(item_id),
            quantity,
        }
    }
}

/// A validated, non-empty cart.
///
/// Lines keep their submitted order and are not merged: two lines for the
/// same item become two line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Validates the submitted lines.
    ///
    /// Fails with [`CartError::Empty`] for no lines and
    /// [`CartError::InvalidQuantity`] for the first line below 1.
    pub fn new(lines: Vec<CartLine>) -> Result<Self, CartError> {
        if lines.is_empty() {
            return Err(CartError::Empty);
        }

        if let Some(line) = lines.iter().find(|line| line.quantity < 1) {
            return Err(CartError::InvalidQuantity {
                item_id: line.item_id,
                quantity: line.quantity,
            });
        }

        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines; always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
