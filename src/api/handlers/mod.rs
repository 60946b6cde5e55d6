//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

mod auth;
mod fruits;
mod health;

pub use auth::{login_handler, logout_handler, register_handler};
pub use fruits::{
    create_fruit_handler, delete_fruit_handler, get_fruit_handler, list_fruits_handler,
    update_fruit_handler,
};
pub use health::health_handler;
