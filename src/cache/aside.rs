//! Cache-aside Module
//!
//! Read-through wrapper around the response store: look up a key, and on a
//! miss run the loader and remember its result for a TTL. Writes never
//! invalidate list entries; those lag mutations by at most their TTL.

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::SharedStore;
use crate::error::AppError;

/// Read-through cache over a shared JSON store.
#[derive(Debug, Clone)]
pub struct CacheAside {
    store: SharedStore<Value>,
}

impl CacheAside {
    pub fn new(store: SharedStore<Value>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &SharedStore<Value> {
        &self.store
    }

    // == Read ==
    /// Returns the cached value for `key`, or loads, stores and returns it.
    ///
    /// The loader runs only on a miss. A loader error is returned as-is and
    /// nothing is cached. A failed cache write is logged and swallowed; the
    /// freshly loaded value is still returned.
    pub async fn read<T, E, F, Fut>(&self, key: &str, ttl_seconds: i64, loader: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.lookup(key).await {
            return Ok(hit);
        }

        let value = loader().await?;

        if let Err(err) = self.fill(key, &value, ttl_seconds).await {
            warn!(key, error = %err, "Cache write failed, serving uncached value");
        }

        Ok(value)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cached = self.store.write().await.get(key)?;

        match serde_json::from_value(cached) {
            Ok(value) => {
                debug!(key, "Cache HIT");
                Some(value)
            }
            Err(err) => {
                warn!(key, error = %err, "Cached value has unexpected shape, treating as miss");
                None
            }
        }
    }

    async fn fill<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: i64) -> Result<(), AppError> {
        let json = serde_json::to_value(value)
            .map_err(|err| AppError::CacheWriteFailure(err.to_string()))?;

        self.store.write().await.set(key, json, Some(ttl_seconds))?;
        debug!(key, ttl_seconds, "Cache SET");
        Ok(())
    }
}
