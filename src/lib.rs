//! Fruit Catalog - catalog API with token auth and an expiring cache
//!
//! Accounts log in for signed, time-bounded session tokens. Logout places
//! the token on a self-expiring blacklist, and catalog reads go through a
//! cache-aside layer over the same kind of in-memory expiring store.

pub mod api;
pub mod auth;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{AppError, Result};
