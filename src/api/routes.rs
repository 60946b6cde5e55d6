//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use super::handlers::{
    create_fruit_handler, delete_fruit_handler, get_fruit_handler, health_handler,
    list_fruits_handler, login_handler, logout_handler, register_handler, update_fruit_handler,
};
use super::AppState;
use crate::auth::require_auth;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Auth gate: every `/api/fruits` route
/// - CORS: the configured origin, with credentials
/// - Tracing: logs all requests
pub fn create_router(state: AppState) -> Router {
    let auth = Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler));

    let fruits = Router::new()
        .route("/", get(list_fruits_handler).post(create_fruit_handler))
        .route(
            "/:id",
            get(get_fruit_handler)
                .put(update_fruit_handler)
                .delete(delete_fruit_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            require_auth,
        ));

    Router::new()
        .route("/api/health", get(health_handler))
        .nest("/api/auth", auth)
        .nest("/api/fruits", fruits)
        .layer(cors_layer(&state.config.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            warn!(origin, "Invalid CORS origin, cross-origin requests will be refused");
            cors
        }
    }
}
