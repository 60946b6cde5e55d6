//! Account handlers: register, login, logout

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::{info, warn};

use crate::api::AppState;
use crate::catalog::NewUser;
use crate::error::{AppError, Result};
use crate::models::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};

/// Handler for POST /api/auth/register
pub async fn register_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let Json(req) = payload?;
    let registration = req.validate().map_err(AppError::InvalidRequest)?;

    if state
        .catalog
        .find_user_by_email(&registration.email)
        .await?
        .is_some()
    {
        warn!(email = %registration.email, "Registration refused, email already in use");
        return Err(AppError::DuplicateAccount);
    }

    let credential = state.hasher.hash_blocking(registration.password).await?;
    let user = state
        .catalog
        .insert_user(NewUser {
            name: registration.name,
            email: registration.email,
            credential,
        })
        .await?;

    let token = state.gate.tokens().issue(&user.id, &user.email)?;
    info!(email = %user.email, "New user registered");

    Ok((StatusCode::CREATED, Json(AuthResponse::new(token, &user))))
}

/// Handler for POST /api/auth/login
///
/// Unknown email and wrong password return the same response.
pub async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let Json(req) = payload?;
    let (email, password) = req.validate().map_err(AppError::InvalidRequest)?;

    let Some(user) = state.catalog.find_user_by_email(&email).await? else {
        warn!(%email, "Login failed, unknown user");
        return Err(AppError::InvalidCredentials);
    };

    if !state
        .hasher
        .verify_blocking(password, user.credential.clone())
        .await?
    {
        warn!(%email, "Login failed, wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.gate.tokens().issue(&user.id, &user.email)?;
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    info!(%email, ip, "Login OK");

    Ok(Json(AuthResponse::new(token, &user)))
}

/// Handler for POST /api/auth/logout
///
/// Blacklists the bearer token for the rest of its lifetime. A missing token
/// or one not signed by this server is a bad request.
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>> {
    state.gate.logout(&headers).await.map_err(|err| match err {
        AppError::MissingToken => {
            AppError::InvalidRequest("Missing bearer token in Authorization header.".to_string())
        }
        AppError::InvalidOrExpiredToken => {
            AppError::InvalidRequest("Invalid token.".to_string())
        }
        other => other,
    })?;

    Ok(Json(MessageResponse::new("Logged out. Token invalidated.")))
}
