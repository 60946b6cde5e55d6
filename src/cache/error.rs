//! Store Error Module

use thiserror::Error;

/// Reasons a store write can be refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key exceeds the length limit
    #[error("key of {len} bytes exceeds maximum length of {max} bytes")]
    KeyTooLong { len: usize, max: usize },

    /// Store is at capacity with no expired entries to reclaim
    #[error("store is full ({0} entries)")]
    StoreFull(usize),
}
