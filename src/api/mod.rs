//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /api/health` - Health check, no auth
//! - `POST /api/auth/register` - Create an account and get a token
//! - `POST /api/auth/login` - Exchange credentials for a token
//! - `POST /api/auth/logout` - Invalidate the bearer token
//! - `GET|POST /api/fruits` - Search or add fruits (auth)
//! - `GET|PUT|DELETE /api/fruits/:id` - Read, replace or remove a fruit (auth)

pub mod handlers;
pub mod routes;
mod state;

pub use handlers::*;
pub use routes::create_router;
pub use state::AppState;
