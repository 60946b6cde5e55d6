//! Catalog Module
//!
//! Fruit and account models, the data store trait the handlers call
//! through, and an in-memory store implementation.

mod memory;
mod model;
mod store;

pub use memory::MemoryCatalog;
pub use model::{fruit_cache_key, Fruit, FruitInput, FruitQuery, NewUser, User};
pub use store::{CatalogStore, StoreError, SEARCH_LIMIT};
