//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::catalog::User;

/// Public view of an account; never includes the credential.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Response body for register and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            user: user.into(),
        }
    }
}

/// Response body carrying only a message (logout)
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for DELETE /api/fruits/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}

impl DeleteResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            message: "Fruit deleted.".to_string(),
            id: id.into(),
        }
    }
}

/// Store counters reported by the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatus {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            entries: stats.total_entries,
        }
    }
}

/// Response body for GET /api/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status ("ok")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    pub cache: CacheStatus,
    /// Blacklist entries held, including expired ones not yet purged
    pub blacklisted: usize,
}

impl HealthResponse {
    pub fn ok(cache: CacheStats, blacklisted: usize) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cache: cache.into(),
            blacklisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credential;
    use chrono::Utc;

    #[test]
    fn test_auth_response_hides_credential() {
        let user = User {
            id: "u1".into(),
            name: "Ana".into(),
            email: "a@b.com".into(),
            credential: Credential {
                salt: "salt".into(),
                hash: "hash".into(),
            },
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&AuthResponse::new("tok".into(), &user)).unwrap();
        assert!(json.contains("\"token\":\"tok\""));
        assert!(json.contains("a@b.com"));
        assert!(!json.contains("salt"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let json = serde_json::to_value(DeleteResponse::new("abc")).unwrap();
        assert_eq!(json["id"], "abc");
        assert!(json["message"].is_string());
    }

    #[test]
    fn test_health_response_serialize() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        let json = serde_json::to_value(HealthResponse::ok(stats, 3)).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json.get("timestamp").is_some());
        assert_eq!(json["cache"]["hit_rate"], 0.5);
        assert_eq!(json["blacklisted"], 3);
    }
}
