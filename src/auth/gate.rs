//! Auth gate
//!
//! Per-request guard: bearer token present, not blacklisted, signature and
//! expiry valid. Each step runs only if the previous one passed, and the
//! decoded identity is attached to the request for downstream handlers.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use super::{TokenBlacklist, TokenService, DEFAULT_BLACKLIST_TTL};
use crate::error::{AppError, Result};

/// Identity of an authorized request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// Result of a successful logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logout {
    /// Email read from the token, if it could be decoded
    pub email: Option<String>,
    /// Seconds the token stays blacklisted
    pub ttl_seconds: i64,
}

/// Returns the token of an `Authorization: Bearer <token>` header.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// Blacklist check followed by token validation.
#[derive(Debug, Clone)]
pub struct AuthGate {
    blacklist: TokenBlacklist,
    tokens: TokenService,
}

impl AuthGate {
    pub fn new(blacklist: TokenBlacklist, tokens: TokenService) -> Self {
        Self { blacklist, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn blacklist(&self) -> &TokenBlacklist {
        &self.blacklist
    }

    // == Authorize ==
    /// Runs the gate against request headers.
    ///
    /// A blacklisted token is rejected even if its signature and expiry are
    /// still valid.
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<AuthUser> {
        let token = extract_bearer(headers).ok_or_else(|| {
            warn!("access denied: no bearer token");
            AppError::MissingToken
        })?;

        if self.blacklist.contains(token).await {
            warn!("access denied: token is blacklisted");
            return Err(AppError::BlacklistedToken);
        }

        let claims = self.tokens.validate(token).inspect_err(|_| {
            warn!("access denied: token invalid or expired");
        })?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }

    // == Logout ==
    /// Blacklists the bearer token until it would have expired anyway.
    ///
    /// Only tokens signed with our secret are accepted; an expired one is
    /// fine. The entry TTL never exceeds the session lifetime, and a token
    /// without a readable expiry is blacklisted for an hour.
    pub async fn logout(&self, headers: &HeaderMap) -> Result<Logout> {
        let token = extract_bearer(headers).ok_or(AppError::MissingToken)?;

        self.tokens.verify_signature(token).inspect_err(|_| {
            warn!("logout refused: token signature invalid");
        })?;

        let claims = TokenService::decode_unverified_for_logout(token);
        let ttl_seconds = claims
            .as_ref()
            .and_then(|c| c.exp)
            .map(|exp| self.tokens.remaining_lifetime(exp))
            .unwrap_or(DEFAULT_BLACKLIST_TTL);

        self.blacklist.insert(token, ttl_seconds).await?;

        let email = claims.and_then(|c| c.email);
        info!(
            email = email.as_deref().unwrap_or("unknown"),
            ttl_seconds, "Logout, token invalidated"
        );

        Ok(Logout { email, ttl_seconds })
    }
}

/// Middleware guarding the catalog routes.
///
/// On success the [`AuthUser`] is stored in request extensions.
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let user = gate.authorize(req.headers()).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use crate::cache::{ExpiringStore, ManualClock};

    fn gate() -> (AuthGate, Arc<ManualClock>) {
        gate_with_capacity(100)
    }

    fn gate_with_capacity(max_entries: usize) -> (AuthGate, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_now());
        let store = ExpiringStore::with_clock(max_entries, clock.clone()).into_shared();
        let tokens = TokenService::new("secret", 3600, clock.clone());
        (AuthGate::new(TokenBlacklist::new(store), tokens), clock)
    }

    fn sign(secret: &str, claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&bearer("abc")), Some("abc"));
        assert_eq!(extract_bearer(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer(&headers), None);
    }

    #[tokio::test]
    async fn test_valid_token_is_authorized() {
        let (gate, _) = gate();
        let token = gate.tokens().issue("user-a", "a@b.com").unwrap();

        let user = gate.authorize(&bearer(&token)).await.unwrap();
        assert_eq!(
            user,
            AuthUser {
                id: "user-a".into(),
                email: "a@b.com".into()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let (gate, _) = gate();
        let err = gate.authorize(&HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, AppError::MissingToken));
    }

    #[tokio::test]
    async fn test_logged_out_token_rejected_as_blacklisted() {
        let (gate, _) = gate();
        let token = gate.tokens().issue("user-a", "a@b.com").unwrap();

        let logout = gate.logout(&bearer(&token)).await.unwrap();
        assert_eq!(logout.email.as_deref(), Some("a@b.com"));
        assert_eq!(logout.ttl_seconds, 3600);

        // Still cryptographically valid, but blacklisted
        assert!(gate.tokens().validate(&token).is_ok());
        let err = gate.authorize(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AppError::BlacklistedToken));
    }

    #[tokio::test]
    async fn test_blacklist_ttl_tracks_token_lifetime() {
        let (gate, clock) = gate();
        let token = gate.tokens().issue("user-a", "a@b.com").unwrap();

        clock.advance_secs(600);
        let logout = gate.logout(&bearer(&token)).await.unwrap();
        assert_eq!(logout.ttl_seconds, 3000);

        clock.advance_secs(2999);
        assert!(gate.blacklist().contains(&token).await);
        clock.advance_secs(1);
        assert!(!gate.blacklist().contains(&token).await);

        // Once the entry lapses, the token is rejected for being expired
        let err = gate.authorize(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidOrExpiredToken));
    }

    #[tokio::test]
    async fn test_logout_of_token_without_expiry_uses_default_ttl() {
        let (gate, _) = gate();
        let token = sign("secret", json!({"email": "a@b.com"}));

        let logout = gate.logout(&bearer(&token)).await.unwrap();
        assert_eq!(logout.ttl_seconds, DEFAULT_BLACKLIST_TTL);
        assert_eq!(logout.email.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_logout_refuses_unsigned_tokens() {
        let (gate, _) = gate();

        for token in [
            "garbage".to_string(),
            sign("other-secret", json!({"sub": "x", "exp": i64::MIN})),
            sign("other-secret", json!({"sub": "x", "exp": i64::MAX / 2})),
        ] {
            let err = gate.logout(&bearer(&token)).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidOrExpiredToken));
        }
        assert!(gate.blacklist().is_empty().await);
    }

    #[tokio::test]
    async fn test_logout_ttl_is_capped_at_session_lifetime() {
        let (gate, clock) = gate();
        let far = sign("secret", json!({"sub": "x", "exp": i64::MAX / 2}));
        let past = sign("secret", json!({"sub": "x", "exp": i64::MIN}));

        assert_eq!(gate.logout(&bearer(&far)).await.unwrap().ttl_seconds, 3600);
        assert_eq!(gate.logout(&bearer(&past)).await.unwrap().ttl_seconds, 1);

        clock.advance_secs(3600);
        assert!(!gate.blacklist().contains(&far).await);
        assert!(!gate.blacklist().contains(&past).await);
    }

    #[tokio::test]
    async fn test_forged_logouts_cannot_exhaust_blacklist() {
        let (gate, _) = gate_with_capacity(5);
        for i in 0..5 {
            let forged = sign("other-secret", json!({"sub": format!("user-{i}"), "exp": i64::MAX / 2}));
            assert!(gate.logout(&bearer(&forged)).await.is_err());
        }

        let token = gate.tokens().issue("user-a", "a@b.com").unwrap();
        gate.logout(&bearer(&token)).await.unwrap();

        let err = gate.authorize(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AppError::BlacklistedToken));
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let (gate, clock) = gate();
        let token = gate.tokens().issue("user-a", "a@b.com").unwrap();
        clock.advance_secs(3600);

        let err = gate.authorize(&bearer(&token)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidOrExpiredToken));
    }
}
