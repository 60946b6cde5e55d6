//! Session tokens
//!
//! HS256 JWTs carrying the account id and email. Expiry is checked against
//! the injected clock rather than the library's wall-clock check.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::cache::Clock;
use crate::error::{AppError, Result};

/// Default session lifetime in seconds.
pub const DEFAULT_TOKEN_TTL: i64 = 3600;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id
    pub sub: String,
    pub email: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

/// Claims read from a token whose signature was NOT checked.
///
/// Only good for sizing a blacklist entry; never for authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UnverifiedClaims {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Issues and validates session tokens under one secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    signature_only: Validation,
    ttl_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// A non-positive `ttl_seconds` falls back to [`DEFAULT_TOKEN_TTL`].
    pub fn new(secret: &str, ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let mut signature_only = Validation::new(Algorithm::HS256);
        signature_only.validate_exp = false;
        signature_only.validate_aud = false;
        signature_only.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            signature_only,
            ttl_seconds: if ttl_seconds > 0 {
                ttl_seconds
            } else {
                DEFAULT_TOKEN_TTL
            },
            clock,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    // == Issue ==
    /// Signs a token for `subject` expiring `ttl_seconds` from now.
    pub fn issue(&self, subject: &str, email: &str) -> Result<String> {
        let iat = self.clock.now_secs();
        let claims = SessionClaims {
            sub: subject.to_string(),
            email: email.to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_seconds),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|err| {
            error!(error = %err, "failed to sign session token");
            AppError::Internal("token signing failed".to_string())
        })
    }

    // == Validate ==
    /// Checks signature and expiry, returning the claims on success.
    pub fn validate(&self, token: &str) -> Result<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| {
                debug!(error = %err, "token failed verification");
                AppError::InvalidOrExpiredToken
            })?;

        if data.claims.exp <= self.clock.now_secs() {
            debug!(sub = %data.claims.sub, "token expired");
            return Err(AppError::InvalidOrExpiredToken);
        }

        Ok(data.claims)
    }

    // == Verify Signature ==
    /// Checks that `token` was signed with this service's secret.
    ///
    /// Expiry and claims are ignored, so an expired token still passes.
    pub fn verify_signature(&self, token: &str) -> Result<()> {
        decode::<UnverifiedClaims>(token, &self.decoding_key, &self.signature_only)
            .map(|_| ())
            .map_err(|err| {
                debug!(error = %err, "token signature rejected");
                AppError::InvalidOrExpiredToken
            })
    }

    // == Decode Unverified ==
    /// Reads claims WITHOUT checking the signature or expiry.
    ///
    /// Used only by logout to size the blacklist entry.
    pub fn decode_unverified_for_logout(token: &str) -> Option<UnverifiedClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<UnverifiedClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }

    /// Seconds until `exp`, kept within `1..=ttl_seconds`.
    ///
    /// No token issued here outlives `ttl_seconds`, so a larger value can
    /// only come from a claim that was never ours.
    pub fn remaining_lifetime(&self, exp: i64) -> i64 {
        exp.saturating_sub(self.clock.now_secs())
            .clamp(1, self.ttl_seconds)
    }
}
