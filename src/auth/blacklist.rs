//! Logout blacklist
//!
//! Tokens invalidated before their natural expiry. Every entry carries a
//! TTL, so the blacklist drains itself as tokens would have expired anyway.

use tracing::debug;

use crate::cache::SharedStore;
use crate::error::Result;

/// TTL used when a token's own expiry cannot be read.
pub const DEFAULT_BLACKLIST_TTL: i64 = 3600;

#[derive(Debug, Clone)]
pub struct TokenBlacklist {
    store: SharedStore<()>,
}

impl TokenBlacklist {
    pub fn new(store: SharedStore<()>) -> Self {
        Self { store }
    }

    /// Blacklists `token` for `ttl_seconds`, or for the default hour when
    /// the TTL is not positive.
    pub async fn insert(&self, token: &str, ttl_seconds: i64) -> Result<()> {
        let ttl = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            DEFAULT_BLACKLIST_TTL
        };

        self.store.write().await.set(token, (), Some(ttl))?;
        debug!(ttl, "token blacklisted");
        Ok(())
    }

    /// Returns true while the token's blacklist entry is live.
    pub async fn contains(&self, token: &str) -> bool {
        self.store.write().await.contains(token)
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
