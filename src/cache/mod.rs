//! Cache Module
//!
//! In-memory key-value storage with lazy TTL expiry, used both as the
//! logout blacklist and as the response cache, plus the cache-aside layer
//! that reads through it.

mod aside;
mod clock;
mod entry;
mod error;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use aside::CacheAside;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use error::CacheError;
pub use stats::CacheStats;
pub use store::{ExpiringStore, SharedStore};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 1024;
