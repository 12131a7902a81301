//! HTTP route handlers.

pub mod cart;
pub mod health;
pub mod items;
pub mod metrics;
pub mod orders;

use domain::{CatalogService, CheckoutTransactor};
use read_model::OrderHistory;
use store::Store;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub catalog: CatalogService,
    pub checkout: CheckoutTransactor,
    pub order_history: OrderHistory,
    pub store: Store,
}
