//! Relational store client for the storefront backend.
//!
//! One [`Store`] value wraps a shared connection pool plus the [`Dialect`] of
//! the backend it talks to. It is constructed once at startup and handed to
//! every component that needs persistence; there is no global handle.
//!
//! - [`config`] - connection settings
//! - [`dialect`] - per-backend SQL and [`Capabilities`] flags
//! - [`schema`] - table creation and catalog seeding
//! - [`error`] - store error type

pub mod config;
pub mod dialect;
pub mod error;
pub mod schema;
mod store;

pub use config::{DEFAULT_DATABASE_URL, StoreConfig};
pub use dialect::{Backend, Capabilities, Dialect, SchemaStatement};
pub use error::{Result, StoreError};
pub use schema::SEED_ITEMS;
pub use store::Store;
