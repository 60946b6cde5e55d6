//! Error types for the catalog server
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::CacheError;
use crate::catalog::StoreError;

/// Body returned for every auth gate rejection, whatever the cause.
pub const GENERIC_AUTH_MESSAGE: &str = "Invalid or expired token.";

/// Body returned for every unexpected failure.
pub const GENERIC_SERVER_MESSAGE: &str = "Internal server error.";

// == App Error Enum ==
/// Unified error type for the catalog server.
#[derive(Error, Debug)]
pub enum AppError {
    /// No bearer token in the Authorization header
    #[error("missing bearer token")]
    MissingToken,

    /// Token was invalidated by a logout
    #[error("token has been invalidated")]
    BlacklistedToken,

    /// Token signature or expiry check failed
    #[error("invalid or expired token")]
    InvalidOrExpiredToken,

    /// Unknown email or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("account already exists")]
    DuplicateAccount,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response cache could not be written; never surfaces to clients
    #[error("cache write failed: {0}")]
    CacheWriteFailure(String),

    /// Data store call failed
    #[error("store failure: {0}")]
    UpstreamStoreFailure(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns true for the three auth gate rejections.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            AppError::MissingToken | AppError::BlacklistedToken | AppError::InvalidOrExpiredToken
        )
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken
            | AppError::BlacklistedToken
            | AppError::InvalidOrExpiredToken
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DuplicateAccount => StatusCode::CONFLICT,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CacheWriteFailure(_)
            | AppError::UpstreamStoreFailure(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => AppError::DuplicateAccount,
            other => AppError::UpstreamStoreFailure(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        AppError::CacheWriteFailure(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::MissingToken
            | AppError::BlacklistedToken
            | AppError::InvalidOrExpiredToken => GENERIC_AUTH_MESSAGE.to_string(),
            AppError::InvalidCredentials => "Invalid credentials.".to_string(),
            AppError::DuplicateAccount => "Email already registered.".to_string(),
            AppError::InvalidRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::CacheWriteFailure(detail)
            | AppError::UpstreamStoreFailure(detail)
            | AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                GENERIC_SERVER_MESSAGE.to_string()
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog server.
pub type Result<T> = std::result::Result<T, AppError>;
