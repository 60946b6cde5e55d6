//! Shared application state

use std::sync::Arc;

use crate::auth::{AuthGate, PasswordHasher, TokenBlacklist, TokenService};
use crate::cache::{CacheAside, Clock, ExpiringStore, SystemClock};
use crate::catalog::{CatalogStore, MemoryCatalog};
use crate::config::Config;

/// Application state shared across all handlers.
///
/// Every component is constructed here and passed in; nothing is a global.
/// The response cache and the blacklist are separate stores on one clock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Document store collaborator
    pub catalog: Arc<dyn CatalogStore>,
    /// Read-through response cache
    pub cache: CacheAside,
    /// Blacklist check and token validation
    pub gate: AuthGate,
    pub hasher: PasswordHasher,
}

impl AppState {
    /// Wires the state from explicit parts.
    pub fn new(config: Config, catalog: Arc<dyn CatalogStore>, clock: Arc<dyn Clock>) -> Self {
        let cache_store =
            ExpiringStore::with_clock(config.max_cache_entries, clock.clone()).into_shared();
        let blacklist_store =
            ExpiringStore::with_clock(config.max_blacklist_entries, clock.clone()).into_shared();
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl, clock);

        Self {
            cache: CacheAside::new(cache_store),
            gate: AuthGate::new(TokenBlacklist::new(blacklist_store), tokens),
            hasher: PasswordHasher::new(),
            catalog,
            config: Arc::new(config),
        }
    }

    /// Creates state backed by the in-memory catalog and the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.clone(),
            Arc::new(MemoryCatalog::new()),
            Arc::new(SystemClock),
        )
    }
}
