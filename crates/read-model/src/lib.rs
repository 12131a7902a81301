//! Read side of the storefront backend.
//!
//! [`OrderHistory`] reassembles persisted orders, their line items and the
//! catalog titles of those items into nested [`OrderSummary`] values.
//! Queries here never open a transaction; each statement sees whatever the
//! store's default isolation level shows it.

pub mod error;
pub mod order_history;

pub use error::{ReadModelError, Result};
pub use order_history::{OrderHistory, OrderLine, OrderSummary};
