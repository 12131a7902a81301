//! Domain layer for the storefront backend.
//!
//! This crate provides:
//! - Validated inputs: [`Cart`]/[`CartLine`] for checkout, [`NewItem`] for the catalog
//! - [`CatalogService`] for listing and adding catalog items
//! - [`CheckoutTransactor`], which turns a cart into an order and its line
//!   items inside a single store transaction

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod item;

pub use cart::{Cart, CartLine};
pub use catalog::CatalogService;
pub use checkout::CheckoutTransactor;
pub use common::{ItemId, OrderId};
pub use error::{CartError, DomainError, ItemError};
pub use item::{Item, MAX_TITLE_LENGTH, NewItem};
