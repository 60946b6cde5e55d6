//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Signing secret used when `JWT_SECRET` is unset. Not safe for production.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub token_ttl: i64,
    /// TTL in seconds for cached search results
    pub list_cache_ttl: i64,
    /// TTL in seconds for cached single fruits
    pub item_cache_ttl: i64,
    /// Maximum number of cached responses
    pub max_cache_entries: usize,
    /// Maximum number of blacklisted tokens
    pub max_blacklist_entries: usize,
    /// Browser origin allowed by CORS
    pub cors_origin: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 4000)
    /// - `JWT_SECRET` - token signing secret (default: insecure dev secret)
    /// - `TOKEN_TTL` - session lifetime in seconds (default: 3600, must be positive)
    /// - `LIST_CACHE_TTL` - search cache TTL in seconds (default: 60)
    /// - `ITEM_CACHE_TTL` - by-id cache TTL in seconds (default: 300)
    /// - `MAX_CACHE_ENTRIES` - response cache capacity (default: 10000)
    /// - `MAX_BLACKLIST_ENTRIES` - blacklist capacity (default: 100000)
    /// - `CORS_ORIGIN` - allowed origin (default: http://localhost:5173)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            jwt_secret: env::var("JWT_SECRET")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.jwt_secret),
            token_ttl: positive_or(parse_var("TOKEN_TTL"), defaults.token_ttl),
            list_cache_ttl: parse_var("LIST_CACHE_TTL").unwrap_or(defaults.list_cache_ttl),
            item_cache_ttl: parse_var("ITEM_CACHE_TTL").unwrap_or(defaults.item_cache_ttl),
            max_cache_entries: parse_var("MAX_CACHE_ENTRIES")
                .unwrap_or(defaults.max_cache_entries),
            max_blacklist_entries: parse_var("MAX_BLACKLIST_ENTRIES")
                .unwrap_or(defaults.max_blacklist_entries),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
        }
    }

    /// True when tokens are signed with the built-in development secret.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn positive_or(value: Option<i64>, default: i64) -> i64 {
    match value {
        Some(v) if v > 0 => v,
        Some(v) => {
            tracing::warn!(value = v, default, "Ignoring non-positive TTL");
            default
        }
        None => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 4000,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: 3600,
            list_cache_ttl: 60,
            item_cache_ttl: 300,
            max_cache_entries: 10_000,
            max_blacklist_entries: 100_000,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}
